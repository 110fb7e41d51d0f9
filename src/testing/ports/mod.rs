mod fake_deployer;
mod fixed_clock;

pub use self::fake_deployer::{FakeDeployer, SubmittedDeployment};
pub use self::fixed_clock::FixedClock;
