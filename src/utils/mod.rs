pub mod countries;
pub mod html;
pub mod referral;
pub mod validation;
