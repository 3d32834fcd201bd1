pub mod environment;

pub use environment::{
    get_environment, get_session_database_filename, initialize_logging_system,
    load_environment_variables, Environment, EnvironmentConfig, StoreConfig,
};
