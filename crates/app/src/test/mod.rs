mod helpers;

pub(crate) use context::TestContext;
