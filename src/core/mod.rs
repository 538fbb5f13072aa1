// Domain-layer modules and shared errors/models
pub mod account_numbers {
    pub use crate::account_numbers::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}

pub mod validation {
    pub use crate::validation::*;
}
