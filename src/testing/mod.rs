mod fake_repository_api;
mod fixtures;

pub use fake_repository_api::FakeRepositoryApi;
pub use fixtures::{AgendaFixture, TestSigner, transfer_registry};
