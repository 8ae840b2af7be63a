pub mod books;
pub mod catalog;
pub mod checkout;
pub mod fees;
pub mod patrons;

pub mod core {
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod library;
    pub mod locks;
    pub mod repository;
}

pub mod utils {
    pub mod date;
    pub mod ddb;
    pub mod validation;
}
