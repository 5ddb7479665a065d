pub mod contact;
pub mod signup;
