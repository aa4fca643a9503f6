//! PEP 427 wheel assembly.
//!
//! A wheel is a zip archive holding the package tree plus a `.dist-info`
//! directory with `METADATA`, `WHEEL`, and a `RECORD` of SHA-256 digests.
//! The archive is staged through a temp file in the output directory and
//! persisted under its final name only once fully written.

use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::config::BuildConfig;
use crate::dist::{editable, ArtifactPackager, DistributionDescriptor};
use crate::errors::PackagingError;
use crate::util::fs::{ensure_dir, glob_files, relative_path};
use crate::util::python::PythonEnv;

/// Wheel and editable-wheel packager.
#[derive(Debug, Clone)]
pub struct WheelPackager {
    python: PythonEnv,
}

impl WheelPackager {
    /// Create a packager for the host interpreter.
    pub fn new(python: PythonEnv) -> Self {
        WheelPackager { python }
    }

    pub(crate) fn python(&self) -> &PythonEnv {
        &self.python
    }
}

impl ArtifactPackager for WheelPackager {
    fn pack_wheel(
        &self,
        dist: &DistributionDescriptor,
        config: &BuildConfig,
        out_dir: &Path,
    ) -> Result<String, PackagingError> {
        let tag = self.python.wheel_tag();
        let wheel_name = format!("{}-{}.whl", dist.file_name_stem(), tag);

        tracing::info!("assembling {}", wheel_name);

        let mut archive = WheelArchive::create(out_dir)?;

        // Package payload: python modules plus the package-data globs that
        // cover compiled artifacts and declaration files.
        let mut patterns = vec!["**/*.py".to_string()];
        patterns.extend(dist.package_data.iter().cloned());
        let files = glob_files(&config.package_dir, &patterns)
            .map_err(|e| PackagingError::BadPattern(e.to_string()))?;

        for file in &files {
            let rel = relative_path(&config.package_dir, file);
            let name = format!("{}/{}", config.package_name, rel.display()).replace('\\', "/");
            archive.add_path(&name, file)?;
        }

        let dist_info = dist.dist_info_dir();
        archive.add_bytes(&format!("{}/METADATA", dist_info), metadata(dist).as_bytes())?;
        archive.add_bytes(
            &format!("{}/WHEEL", dist_info),
            wheel_metadata(dist, &tag).as_bytes(),
        )?;

        archive.finish(&dist_info, &out_dir.join(&wheel_name))?;
        Ok(wheel_name)
    }

    fn pack_editable(
        &self,
        dist: &DistributionDescriptor,
        config: &BuildConfig,
        out_dir: &Path,
    ) -> Result<String, PackagingError> {
        editable::pack(self, dist, config, out_dir)
    }
}

/// Zip writer that accumulates RECORD entries as files are added.
pub(crate) struct WheelArchive {
    zip: ZipWriter<NamedTempFile>,
    records: Vec<String>,
}

impl WheelArchive {
    pub(crate) fn create(out_dir: &Path) -> Result<Self, PackagingError> {
        ensure_dir(out_dir).map_err(|source| PackagingError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        // Staged in the output directory so the final persist is a rename,
        // never a cross-device copy.
        let staging = NamedTempFile::new_in(out_dir).map_err(|source| PackagingError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        Ok(WheelArchive {
            zip: ZipWriter::new(staging),
            records: Vec::new(),
        })
    }

    fn options() -> FileOptions {
        FileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    pub(crate) fn add_path(&mut self, name: &str, path: &Path) -> Result<(), PackagingError> {
        let bytes = std::fs::read(path).map_err(|source| PackagingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_bytes(name, &bytes)
    }

    pub(crate) fn add_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), PackagingError> {
        self.zip.start_file(name, Self::options())?;
        self.zip
            .write_all(bytes)
            .map_err(|source| PackagingError::Io {
                path: name.into(),
                source,
            })?;

        let digest = Sha256::digest(bytes);
        self.records.push(format!(
            "{},sha256={},{}",
            name,
            URL_SAFE_NO_PAD.encode(digest),
            bytes.len()
        ));
        Ok(())
    }

    /// Write RECORD and persist the archive under its final name.
    pub(crate) fn finish(
        mut self,
        dist_info_dir: &str,
        final_path: &Path,
    ) -> Result<(), PackagingError> {
        let record_name = format!("{}/RECORD", dist_info_dir);

        let mut record = self.records.join("\n");
        record.push('\n');
        // RECORD lists itself without a digest.
        record.push_str(&format!("{},,\n", record_name));

        self.zip.start_file(&record_name, Self::options())?;
        self.zip
            .write_all(record.as_bytes())
            .map_err(|source| PackagingError::Io {
                path: record_name.clone().into(),
                source,
            })?;

        let staging = self.zip.finish()?;
        staging
            .persist(final_path)
            .map_err(|e| PackagingError::Io {
                path: final_path.to_path_buf(),
                source: e.error,
            })?;
        Ok(())
    }
}

pub(crate) fn metadata(dist: &DistributionDescriptor) -> String {
    format!(
        "Metadata-Version: 2.1\nName: {}\nVersion: {}\n",
        dist.name, dist.version
    )
}

pub(crate) fn wheel_metadata(dist: &DistributionDescriptor, tag: &str) -> String {
    format!(
        "Wheel-Version: 1.0\nGenerator: pyxis {}\nRoot-Is-Purelib: {}\nTag: {}\n",
        env!("CARGO_PKG_VERSION"),
        dist.purelib,
        tag
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Language;
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::Read;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn python_env() -> PythonEnv {
        PythonEnv {
            executable: PathBuf::from("/usr/bin/python3"),
            python_tag: "cp312".to_string(),
            abi_tag: "cp312".to_string(),
            platform_tag: "linux_x86_64".to_string(),
            ext_suffix: ".cpython-312-x86_64-linux-gnu.so".to_string(),
            include_dir: PathBuf::from("/usr/include/python3.12"),
            site_packages: PathBuf::from("/usr/lib/python3.12/site-packages"),
        }
    }

    fn config(root: &Path) -> BuildConfig {
        BuildConfig {
            package_name: "demo".to_string(),
            package_version: "0.1.0".to_string(),
            package_dir: root.join("demo"),
            sources: vec![],
            exclude_dirs: vec![],
            library_dirs: vec![],
            runtime_library_dirs: vec![],
            include_dirs: vec![],
            language: Language::C,
            compiler_directives: BTreeMap::new(),
            nthreads: 0,
            force: false,
            annotate: false,
        }
    }

    fn write_package(root: &Path) {
        let pkg = root.join("demo");
        fs::create_dir_all(pkg.join("core")).unwrap();
        fs::write(pkg.join("__init__.py"), "").unwrap();
        fs::write(pkg.join("base.pxd"), "cdef int x\n").unwrap();
        fs::write(
            pkg.join("core/fast.cpython-312-x86_64-linux-gnu.so"),
            b"\x7fELF-stub",
        )
        .unwrap();
        // Intermediate translation units stay out of the wheel.
        fs::write(pkg.join("core/fast.c"), "int main;\n").unwrap();
    }

    fn archive_names(wheel: &Path) -> Vec<String> {
        let file = fs::File::open(wheel).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_pack_wheel_layout() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path());
        let config = config(tmp.path());
        let dist = DistributionDescriptor::new(&config, vec![]);
        let out_dir = tmp.path().join("dist");

        let name = WheelPackager::new(python_env())
            .pack_wheel(&dist, &config, &out_dir)
            .unwrap();

        assert_eq!(name, "demo-0.1.0-cp312-cp312-linux_x86_64.whl");
        let wheel = out_dir.join(&name);
        assert!(wheel.is_file());

        let names = archive_names(&wheel);
        assert!(names.contains(&"demo/__init__.py".to_string()));
        assert!(names.contains(&"demo/base.pxd".to_string()));
        assert!(names
            .contains(&"demo/core/fast.cpython-312-x86_64-linux-gnu.so".to_string()));
        assert!(!names.iter().any(|n| n.ends_with(".c")));
        assert!(names.contains(&"demo-0.1.0.dist-info/METADATA".to_string()));
        assert!(names.contains(&"demo-0.1.0.dist-info/WHEEL".to_string()));
        assert!(names.contains(&"demo-0.1.0.dist-info/RECORD".to_string()));
    }

    #[test]
    fn test_record_covers_every_entry() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path());
        let config = config(tmp.path());
        let dist = DistributionDescriptor::new(&config, vec![]);
        let out_dir = tmp.path().join("dist");

        let name = WheelPackager::new(python_env())
            .pack_wheel(&dist, &config, &out_dir)
            .unwrap();

        let file = fs::File::open(out_dir.join(&name)).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        let entry_count = zip.len();

        let mut record = String::new();
        zip.by_name("demo-0.1.0.dist-info/RECORD")
            .unwrap()
            .read_to_string(&mut record)
            .unwrap();

        let lines: Vec<&str> = record.lines().collect();
        assert_eq!(lines.len(), entry_count);
        assert!(lines
            .iter()
            .any(|l| l.starts_with("demo/base.pxd,sha256=")));
        assert!(lines.contains(&"demo-0.1.0.dist-info/RECORD,,"));
    }

    #[test]
    fn test_wheel_metadata_is_never_purelib() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path());
        let config = config(tmp.path());
        let dist = DistributionDescriptor::new(&config, vec![]);
        let out_dir = tmp.path().join("dist");

        let name = WheelPackager::new(python_env())
            .pack_wheel(&dist, &config, &out_dir)
            .unwrap();

        let file = fs::File::open(out_dir.join(&name)).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        let mut wheel_file = String::new();
        zip.by_name("demo-0.1.0.dist-info/WHEEL")
            .unwrap()
            .read_to_string(&mut wheel_file)
            .unwrap();

        assert!(wheel_file.contains("Root-Is-Purelib: false"));
        assert!(wheel_file.contains("Tag: cp312-cp312-linux_x86_64"));
    }

    #[test]
    fn test_zero_extension_package_still_packs() {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("demo");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("__init__.py"), "").unwrap();

        let config = config(tmp.path());
        let dist = DistributionDescriptor::new(&config, vec![]);
        let out_dir = tmp.path().join("dist");

        let name = WheelPackager::new(python_env())
            .pack_wheel(&dist, &config, &out_dir)
            .unwrap();

        assert!(out_dir.join(&name).is_file());
    }
}
