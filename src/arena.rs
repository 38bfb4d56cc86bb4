pub use bumpalo::collections::Vec as BumpaloVec;
pub use bumpalo::Bump as BumpaloArena;
