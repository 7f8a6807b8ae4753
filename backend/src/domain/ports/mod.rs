//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod feed_sources;
mod list_stores;
mod login_service;
mod password_hasher;
mod photo_store;
mod registration_service;

#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError};
#[cfg(test)]
pub use feed_sources::{MockEventsSource, MockNewsSource, MockVideoSearch, MockWeatherSource};
pub use feed_sources::{
    EventsSource, FixtureFeeds, NewsSource, UpstreamError, VideoSearch, WeatherSource,
};
#[cfg(test)]
pub use list_stores::{MockCalendarStore, MockShoppingListStore};
pub use list_stores::{CalendarStore, ListStoreError, ShoppingListStore};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use photo_store::MockPhotoStore;
pub use photo_store::{FixturePhotoStore, PhotoStore, PhotoStoreError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;

#[cfg(test)]
mod tests;
