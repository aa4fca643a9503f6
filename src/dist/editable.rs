//! Editable wheel assembly.
//!
//! An editable install leaves the compiled modules in the project tree and
//! points the installed environment back at them: the wheel carries only a
//! `.pth` file naming the project root, plus the usual `.dist-info`. The
//! in-place artifacts produced by the toolchain are what the `.pth` path
//! reaches.

use std::path::Path;

use crate::core::config::BuildConfig;
use crate::dist::wheel::{metadata, wheel_metadata, WheelArchive, WheelPackager};
use crate::dist::{normalize_name, DistributionDescriptor};
use crate::errors::PackagingError;

pub(crate) fn pack(
    packager: &WheelPackager,
    dist: &DistributionDescriptor,
    config: &BuildConfig,
    out_dir: &Path,
) -> Result<String, PackagingError> {
    let tag = packager.python().wheel_tag();
    // The "0.editable" build tag keeps the file distinguishable from the
    // full wheel when both land in one directory.
    let wheel_name = format!("{}-0.editable-{}.whl", dist.file_name_stem(), tag);

    tracing::info!("assembling editable {}", wheel_name);

    let project_root = config
        .package_dir
        .parent()
        .unwrap_or(config.package_dir.as_path());
    let project_root = std::fs::canonicalize(project_root)
        .unwrap_or_else(|_| project_root.to_path_buf());

    let mut archive = WheelArchive::create(out_dir)?;

    let pth_name = format!("__editable__.{}.pth", normalize_name(&dist.name));
    archive.add_bytes(&pth_name, format!("{}\n", project_root.display()).as_bytes())?;

    let dist_info = dist.dist_info_dir();
    archive.add_bytes(&format!("{}/METADATA", dist_info), metadata(dist).as_bytes())?;
    archive.add_bytes(
        &format!("{}/WHEEL", dist_info),
        wheel_metadata(dist, &tag).as_bytes(),
    )?;

    archive.finish(&dist_info, &out_dir.join(&wheel_name))?;
    Ok(wheel_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Language;
    use crate::dist::ArtifactPackager;
    use crate::util::python::PythonEnv;
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

    #[test]
    fn test_editable_wheel_points_at_project_root() {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("demo");
        fs::create_dir_all(&pkg).unwrap();

        let config = BuildConfig {
            package_name: "demo".to_string(),
            package_version: "0.1.0".to_string(),
            package_dir: pkg,
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
        };
        let dist = DistributionDescriptor::new(&config, vec![]);
        let out_dir = tmp.path().join("dist");

        let name = WheelPackager::new(python_env())
            .pack_editable(&dist, &config, &out_dir)
            .unwrap();

        assert_eq!(name, "demo-0.1.0-0.editable-cp312-cp312-linux_x86_64.whl");

        let file = fs::File::open(out_dir.join(&name)).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();

        let mut pth = String::new();
        zip.by_name("__editable__.demo.pth")
            .unwrap()
            .read_to_string(&mut pth)
            .unwrap();

        let root = fs::canonicalize(tmp.path()).unwrap();
        assert_eq!(pth.trim(), root.display().to_string());

        // dist-info travels with the pointer.
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"demo-0.1.0.dist-info/METADATA".to_string()));
        assert!(names.contains(&"demo-0.1.0.dist-info/RECORD".to_string()));
    }
}
