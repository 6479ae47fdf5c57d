use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole UTF-8 text file into a `String`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Resolves a directory path against the current working directory.
///
/// - Absolute paths are returned as-is (not canonicalized)
/// - Relative paths are joined to the current working directory
pub(crate) fn resolve_dir<P: AsRef<Path>>(input: P) -> PathBuf {
	let path = input.as_ref();
	if path.is_absolute() {
		path.to_path_buf()
	} else {
		env::current_dir()
			.unwrap_or_else(|_| PathBuf::from("."))
			.join(path)
	}
}

/// Lists the immediate subdirectories of a directory.
///
/// Returns directory names only (no paths), in no particular order.
pub(crate) fn list_dirs<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	let mut dirs = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_dir() {
			if let Some(name) = path.file_name() {
				dirs.push(name.to_string_lossy().to_string());
			}
		}
	}

	Ok(dirs)
}

/// Lists all files directly contained in a directory.
///
/// Returns full paths. Subdirectories are ignored.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() {
			files.push(path);
		}
	}

	Ok(files)
}
