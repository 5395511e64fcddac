pub mod cart;
pub mod category;
pub mod country;
pub mod coupon;
pub mod course;
pub mod enrollment;
pub mod notification;
pub mod order;
pub mod review;
pub mod teacher;
