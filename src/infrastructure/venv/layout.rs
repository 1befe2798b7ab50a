//! On-disk venv layout: detection and corruption checks

use std::path::{Path, PathBuf};

use crate::domain::entities::CorruptionType;

/// Platform-specific names inside a venv
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub bin: &'static str,
    pub lib: &'static str,
    pub include: &'static str,
    pub python: &'static str,
    pub activate: &'static str,
}

pub const POSIX: Layout = Layout {
    bin: "bin",
    lib: "lib",
    include: "include",
    python: "python",
    activate: "activate",
};

pub const WINDOWS: Layout = Layout {
    bin: "Scripts",
    lib: "Lib",
    include: "Include",
    python: "python.exe",
    activate: "activate.bat",
};

impl Layout {
    /// Layout of venvs created on this platform
    pub fn native() -> Layout {
        if cfg!(windows) {
            WINDOWS
        } else {
            POSIX
        }
    }

    pub fn dirs(&self) -> [&'static str; 3] {
        [self.bin, self.lib, self.include]
    }

    pub fn interpreter(&self, venv: &Path) -> PathBuf {
        venv.join(self.bin).join(self.python)
    }

    pub fn activate_script(&self, venv: &Path) -> PathBuf {
        venv.join(self.bin).join(self.activate)
    }

    /// Files whose timestamps reflect venv activity.
    ///
    /// Includes lock/requirements files of the enclosing project.
    pub fn activity_markers(&self, venv: &Path) -> Vec<PathBuf> {
        let bin = venv.join(self.bin);
        let mut markers = vec![
            bin.join(self.activate),
            bin.join("activate.fish"),
            bin.join("activate.csh"),
            bin.join(self.python),
            bin.join("pip"),
            bin.join("pip3"),
            venv.join("pyvenv.cfg"),
            venv.join(".uv-proj"),
            venv.join("uv.lock"),
            venv.join("requirements.txt"),
        ];
        if let Some(project) = venv.parent() {
            markers.push(project.join("uv.lock"));
            markers.push(project.join("requirements.txt"));
        }
        markers
    }

    /// `site-packages` directories (POSIX nests them under `lib/pythonX.Y`)
    pub fn site_packages(&self, venv: &Path) -> Vec<PathBuf> {
        let lib = venv.join(self.lib);
        let direct = lib.join("site-packages");
        if direct.is_dir() {
            return vec![direct];
        }
        let Ok(entries) = std::fs::read_dir(&lib) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("python"))
            .map(|e| e.path().join("site-packages"))
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();
        dirs
    }
}

/// State of the interpreter entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    Present,
    /// Symlink whose target is gone
    Dangling,
    Missing,
}

/// What was found at a candidate path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub layout: Layout,
    pub missing_dirs: Vec<&'static str>,
    pub has_cfg: bool,
    pub interpreter: Interpreter,
    pub has_activate: bool,
}

impl Detection {
    /// Two of three layout dirs plus at least one venv marker
    pub fn is_venv(&self) -> bool {
        self.missing_dirs.len() <= 1
            && (self.has_cfg || self.interpreter != Interpreter::Missing || self.has_activate)
    }
}

/// Inspect `path` with the given layout. Only `stat` calls are made.
pub fn detect(path: &Path, layout: Layout) -> Detection {
    let missing_dirs = layout
        .dirs()
        .into_iter()
        .filter(|d| !path.join(d).is_dir())
        .collect();

    let python = layout.interpreter(path);
    let interpreter = match std::fs::symlink_metadata(&python) {
        Err(_) => Interpreter::Missing,
        Ok(meta) if meta.file_type().is_symlink() && std::fs::metadata(&python).is_err() => {
            Interpreter::Dangling
        }
        Ok(_) => Interpreter::Present,
    };

    Detection {
        layout,
        missing_dirs,
        has_cfg: path.join("pyvenv.cfg").is_file(),
        interpreter,
        has_activate: std::fs::symlink_metadata(layout.activate_script(path)).is_ok(),
    }
}

/// Classify a detected venv.
///
/// `cfg_readable` is false when `pyvenv.cfg` exists but could not be read.
/// Checks run from most to least severe.
pub fn corruption(path: &Path, detection: &Detection, cfg_readable: bool) -> Option<CorruptionType> {
    let layout_unreadable = detection
        .layout
        .dirs()
        .into_iter()
        .filter(|d| !detection.missing_dirs.contains(d))
        .any(|d| std::fs::read_dir(path.join(d)).is_err());

    if !cfg_readable || layout_unreadable {
        Some(CorruptionType::Unreadable)
    } else if detection.interpreter != Interpreter::Present {
        Some(CorruptionType::MissingPython)
    } else if !detection.has_activate {
        Some(CorruptionType::MissingActivate)
    } else if !detection.missing_dirs.is_empty() {
        Some(CorruptionType::IncompleteLayout)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_venv(root: &Path) {
        for d in ["bin", "lib/python3.12/site-packages", "include"] {
            fs::create_dir_all(root.join(d)).unwrap();
        }
        fs::write(root.join("pyvenv.cfg"), "home = /usr/bin\n").unwrap();
        fs::write(root.join("bin/python"), "").unwrap();
        fs::write(root.join("bin/activate"), "").unwrap();
    }

    #[test]
    fn healthy_venv_is_detected() {
        let dir = tempdir().unwrap();
        make_venv(dir.path());
        let detection = detect(dir.path(), POSIX);
        assert!(detection.is_venv());
        assert_eq!(corruption(dir.path(), &detection, true), None);
    }

    #[test]
    fn plain_directory_is_not_a_venv() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        assert!(!detect(dir.path(), POSIX).is_venv());
    }

    #[test]
    fn layout_without_markers_is_not_a_venv() {
        let dir = tempdir().unwrap();
        for d in ["bin", "lib", "include"] {
            fs::create_dir_all(dir.path().join(d)).unwrap();
        }
        assert!(!detect(dir.path(), POSIX).is_venv());
    }

    #[test]
    fn missing_interpreter_is_corruption() {
        let dir = tempdir().unwrap();
        make_venv(dir.path());
        fs::remove_file(dir.path().join("bin/python")).unwrap();
        let detection = detect(dir.path(), POSIX);
        assert!(detection.is_venv());
        assert_eq!(
            corruption(dir.path(), &detection, true),
            Some(CorruptionType::MissingPython)
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_interpreter_link_is_missing_python() {
        let dir = tempdir().unwrap();
        make_venv(dir.path());
        fs::remove_file(dir.path().join("bin/python")).unwrap();
        std::os::unix::fs::symlink("/nonexistent/python3", dir.path().join("bin/python"))
            .unwrap();
        let detection = detect(dir.path(), POSIX);
        assert_eq!(detection.interpreter, Interpreter::Dangling);
        assert_eq!(
            corruption(dir.path(), &detection, true),
            Some(CorruptionType::MissingPython)
        );
    }

    #[test]
    fn missing_activate_is_corruption() {
        let dir = tempdir().unwrap();
        make_venv(dir.path());
        fs::remove_file(dir.path().join("bin/activate")).unwrap();
        let detection = detect(dir.path(), POSIX);
        assert_eq!(
            corruption(dir.path(), &detection, true),
            Some(CorruptionType::MissingActivate)
        );
    }

    #[test]
    fn missing_include_is_incomplete_layout() {
        let dir = tempdir().unwrap();
        make_venv(dir.path());
        fs::remove_dir_all(dir.path().join("include")).unwrap();
        let detection = detect(dir.path(), POSIX);
        assert!(detection.is_venv());
        assert_eq!(
            corruption(dir.path(), &detection, true),
            Some(CorruptionType::IncompleteLayout)
        );
    }

    #[test]
    fn unreadable_cfg_wins() {
        let dir = tempdir().unwrap();
        make_venv(dir.path());
        fs::remove_file(dir.path().join("bin/python")).unwrap();
        let detection = detect(dir.path(), POSIX);
        assert_eq!(
            corruption(dir.path(), &detection, false),
            Some(CorruptionType::Unreadable)
        );
    }

    #[test]
    fn site_packages_found_under_versioned_lib() {
        let dir = tempdir().unwrap();
        make_venv(dir.path());
        assert_eq!(
            POSIX.site_packages(dir.path()),
            vec![dir.path().join("lib/python3.12/site-packages")]
        );
    }
}
