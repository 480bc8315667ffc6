//! Test helper that builds minimal POSIX ustar archives in memory.

/// Builds a tar archive from `(name, contents)` pairs.
pub(crate) fn build_tar(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    for (name, contents) in entries {
        out.extend_from_slice(&header(name, contents.len()));
        out.extend_from_slice(contents);
        let padding = (512 - contents.len() % 512) % 512;
        out.extend(std::iter::repeat(0u8).take(padding));
    }
    // end-of-archive marker
    out.extend(std::iter::repeat(0u8).take(1024));
    out
}

fn header(name: &str, size: usize) -> [u8; 512] {
    let mut header = [0u8; 512];
    header[..name.len()].copy_from_slice(name.as_bytes());
    header[100..108].copy_from_slice(b"0000644\0");
    header[108..116].copy_from_slice(b"0000000\0");
    header[116..124].copy_from_slice(b"0000000\0");
    header[124..136].copy_from_slice(format!("{size:011o}\0").as_bytes());
    header[136..148].copy_from_slice(b"00000000000\0");
    header[148..156].copy_from_slice(b"        ");
    header[156] = b'0';
    header[257..263].copy_from_slice(b"ustar\0");
    header[263..265].copy_from_slice(b"00");

    let checksum: u32 = header.iter().map(|byte| u32::from(*byte)).sum();
    header[148..154].copy_from_slice(format!("{checksum:06o}").as_bytes());
    header[154] = 0;
    header[155] = b' ';
    header
}
