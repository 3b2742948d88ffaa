pub mod manifest;
pub mod outcome;
pub mod sendgrid;
