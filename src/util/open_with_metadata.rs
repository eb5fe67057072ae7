use std::fs::Metadata;
use std::io::Error;
use std::path::Path;

use tokio::fs::File;

/// Open a file for reading and get its metadata from the open handle.
///
/// Taking the metadata from the handle means the length describes the file actually streamed,
/// even if the path was replaced after it was resolved.
pub async fn open_with_metadata(path: impl AsRef<Path>) -> Result<(File, Metadata), Error> {
    let file = File::open(path).await?;
    let metadata = file.metadata().await?;
    Ok((file, metadata))
}
