//! Mock construction helpers

use mockall::mock;
use streamable_rs::{Receiver, Result, Value};

mock! {
    /// Mock receiver for asserting how often and with what a stage is called
    pub Stage {}

    impl Receiver for Stage {
        fn receive(&self, input: Value) -> Result<Value>;
    }
}

/// Mock stage that expects to be called exactly `times` times and echoes its input
pub fn echo_stage(times: usize) -> MockStage {
    let mut stage = MockStage::new();
    stage.expect_receive().times(times).returning(|input| Ok(input));
    stage
}
