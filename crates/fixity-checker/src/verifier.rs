use std::io::{self, Write};
use std::time::Duration;

use fixity_verify::{Checksum, ChecksumSet, ChecksumWriter, DigestAlgorithm};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{Deadline, StepError};

/// Digests computed over one full read of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digested {
    pub digests: ChecksumSet,
    pub bytes:   u64,
}

/// Outcome of a matching comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    pub algorithm: DigestAlgorithm,
    pub checksum:  Checksum,
    pub bytes:     u64,
}

/// Read `reader` to the end through a fixed-size buffer, hashing and
/// discarding every chunk.
///
/// Each read is limited by `read_timeout` and by the run deadline; a read
/// error or a timeout ends the pass.
pub async fn digest_stream<R>(
    reader: &mut R,
    algorithms: &[DigestAlgorithm],
    buffer_size: usize,
    read_timeout: Duration,
    deadline: &Deadline,
) -> Result<Digested, StepError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut writer = ChecksumWriter::new(algorithms, io::sink())?;
    let mut buffer = vec![0u8; buffer_size.max(1)];

    loop {
        let read = deadline
            .try_limit(read_timeout, reader.read(&mut buffer))
            .await?;
        if read == 0 {
            break;
        }
        writer.write_all(&buffer[..read])?;
    }

    let bytes = writer.bytes_processed();
    Ok(Digested {
        digests: writer.finish()?,
        bytes,
    })
}
