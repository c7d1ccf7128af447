pub mod configs;

pub use configs::Entity as Configs;
