use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

/// Opens a corpus file for buffered line-by-line reading.
///
/// The returned reader feeds `FrequencyModel::from_reader` and
/// `SentenceModel::from_reader` without materializing the whole file.
pub fn open_corpus<P: AsRef<Path>>(path: P) -> io::Result<BufReader<File>> {
	Ok(BufReader::new(File::open(path)?))
}

/// Extracts the corpus name from a file path (stem without extension).
///
/// Examples:
/// - `"./data/speech.txt"` → `"speech"`
/// - `"speech.txt"` → `"speech"`
pub fn corpus_name<P: AsRef<Path>>(path: P) -> io::Result<String> {
	let stem = path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Lists all corpus files with a given extension in a directory.
///
/// Returns file names only (no paths). Subdirectories are ignored.
pub fn corpus_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() {
			if path.extension() == Some(std::ffi::OsStr::new(extension)) {
				if let Some(name) = path.file_name() {
					files.push(name.to_string_lossy().to_string());
				}
			}
		}
	}

	Ok(files)
}
