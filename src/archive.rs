use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::AppResult;
use crate::processor::ProcessingResult;

/// Bundle every per-rota CSV into one deflate-compressed archive.
pub fn bundle(result: &ProcessingResult) -> AppResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (filename, bytes) in result.files() {
        writer.start_file(filename, options)?;
        writer.write_all(bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}
