mod checkout;
mod confirm;
mod dynamic;
mod home;
mod not_found;
mod restaurant;

pub use checkout::CheckoutPage;
pub use confirm::ConfirmPage;
pub use dynamic::DynamicPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use restaurant::RestaurantPage;
