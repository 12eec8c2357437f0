//! Fixture packages shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

pub const HELLO_CONTROL: &str = "Package: hello\n\
Version: 2.10-3\n\
Architecture: amd64\n\
Maintainer: Santiago Vila <sanvila@debian.org>\n\
Installed-Size: 280\n\
Depends: libc6 (>= 2.34)\n\
Section: devel\n\
Priority: optional\n\
Homepage: https://www.gnu.org/software/hello/\n\
Description: example package based on GNU hello\n \
The GNU hello program produces a familiar, friendly greeting.\n";

/// Four of the nine fields.
pub const LIBFOO_CONTROL: &str = "Package: libfoo1\n\
Version: 1.2-3\n\
Architecture: arm64\n\
Depends: libssl3 (>= 3.0.0)\n";

fn tar_with(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap()
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn xz(data: &[u8]) -> Vec<u8> {
    let mut enc = xz2::write::XzEncoder::new(Vec::new(), 6);
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn ar_with(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut builder = ar::Builder::new(&mut buf);
        for (name, data) in members {
            let header = ar::Header::new(name.as_bytes().to_vec(), data.len() as u64);
            builder.append(&header, *data).unwrap();
        }
    }
    buf
}

/// A `.deb` with a gzip control member.
pub fn deb_gz(control: &str) -> Vec<u8> {
    let member = gzip(&tar_with(&[("./control", control.as_bytes())]));
    let data = gzip(&tar_with(&[]));
    ar_with(&[
        ("debian-binary", &b"2.0\n"[..]),
        ("control.tar.gz", member.as_slice()),
        ("data.tar.gz", data.as_slice()),
    ])
}

/// A `.deb` with an xz control member, as modern dpkg-deb writes them.
pub fn deb_xz(control: &str) -> Vec<u8> {
    let member = xz(&tar_with(&[("./control", control.as_bytes())]));
    let data = xz(&tar_with(&[]));
    ar_with(&[
        ("debian-binary", &b"2.0\n"[..]),
        ("control.tar.xz", member.as_slice()),
        ("data.tar.xz", data.as_slice()),
    ])
}

/// Lay out a small repository:
///
/// ```text
/// pool/main/h/hello/hello_2.10-3_amd64.deb   (gzip, all nine fields)
/// pool/main/libf/libfoo1_1.2-3_arm64.deb     (xz, four fields)
/// pool/main/b/broken_1.0_all.deb             (not an archive)
/// pool/main/j/lib.jar
/// ```
pub fn write_repository(root: &Path) {
    let write = |rel: &str, bytes: &[u8]| {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    };
    write("pool/main/h/hello/hello_2.10-3_amd64.deb", &deb_gz(HELLO_CONTROL));
    write("pool/main/libf/libfoo1_1.2-3_arm64.deb", &deb_xz(LIBFOO_CONTROL));
    write("pool/main/b/broken_1.0_all.deb", b"this is not an ar archive");
    write("pool/main/j/lib.jar", b"PK\x03\x04");
}
