mod config_fixture;

pub use self::config_fixture::ConfigFixture;
