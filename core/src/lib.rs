pub mod discovery;
pub mod identity;
pub mod neighbor;
pub mod probe;
pub mod resolver;
pub mod system;
pub mod vendors;
