//! File-system helpers: copy, move, remove, match and archive

pub mod archive;
pub mod ops;

pub use archive::create_tar_gz;
pub use ops::{
    copy_file, ensure_dir, matching_entries, move_path, remove_path, visible_entries,
};
