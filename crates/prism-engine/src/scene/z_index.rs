/// Paint layer. Higher layers paint over lower ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
