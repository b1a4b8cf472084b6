//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the validated inputs that every write
//! path goes through before touching storage.

pub mod appointment;
pub mod message;
pub mod password;
pub mod rules;
pub mod user;

pub use appointment::{
    Appointment, AppointmentChanges, AppointmentRequest, AppointmentStatus, DoctorName,
    NewAppointment,
};
pub use message::{Message, NewMessage};
pub use password::Password;
pub use user::{Avatar, Gender, NewUser, Registration, User, UserResponse, UserRole};
