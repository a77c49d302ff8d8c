mod employees;
mod health;
mod uploads;

pub use employees::{
    create_employee, delete_employee, get_employee, list_employees, update_employee,
};
pub use health::health;
pub use uploads::serve_photo;
