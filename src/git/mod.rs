mod parser;
mod repo;

pub use parser::{parse_diff, FilePatch, Hunk, RawHunkLine, RawLineKind};
pub use repo::{changed_files, diff_raw_file, file_at_ref, repo_root_in, working_file};
