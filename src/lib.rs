pub mod error;

pub mod service {
    pub mod config_service;
    pub mod converter;
    pub mod directory;
    pub mod index;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod models {
    pub mod conversion;
    pub mod permissions;
}

pub mod facade {
    pub mod batch_coordinator;
    pub mod conversion_adapter;
    pub mod traits {
        pub mod i_coordinator;
    }
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod utils {
    pub mod permissions;
    pub mod utils;
}
