pub(crate) mod answers;
pub(crate) mod random_play;
pub(crate) mod randomness;
