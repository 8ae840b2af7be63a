pub mod domain;
pub mod dto;
pub mod factory;
pub mod controller;

pub mod command {
    pub mod get_patron_status_cmd;
}
