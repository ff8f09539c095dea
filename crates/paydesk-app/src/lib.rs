// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod error;
pub mod forms;
pub mod ids;
pub mod list;
pub mod model;
pub mod mutation;
pub mod request;
pub mod state;
pub mod tabs;

pub use error::*;
pub use forms::*;
pub use ids::*;
pub use list::*;
pub use model::*;
pub use mutation::*;
pub use request::*;
pub use state::*;
pub use tabs::*;
