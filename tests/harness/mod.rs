#![allow(dead_code, unused_imports)]

pub(crate) mod app_config;
pub(crate) mod fake_az;
pub(crate) mod test_context;

pub(crate) use app_config::app_config;
pub(crate) use fake_az::{FAIL_APP_ENV, FakeAz};
pub(crate) use test_context::TestContext;
