pub mod domain;
pub mod ports;

pub use domain::ConfigFixture;
#[allow(unused_imports)]
pub use ports::{FakeDeployer, FixedClock, SubmittedDeployment};
