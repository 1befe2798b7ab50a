//! On-disk venv fixtures.
//!
//! Venvs use the native layout and have every activity marker set to the
//! requested age, so the scanner sees exactly that age.

use std::fs::{self, File, FileTimes};
use std::path::Path;
use std::time::{Duration, SystemTime};

const DAY: u64 = 24 * 60 * 60;

fn bin_dir() -> &'static str {
    if cfg!(windows) {
        "Scripts"
    } else {
        "bin"
    }
}

fn set_age(path: &Path, age_days: u64) {
    let t = SystemTime::now() - Duration::from_secs(age_days * DAY);
    File::options()
        .write(true)
        .open(path)
        .and_then(|f| f.set_times(FileTimes::new().set_accessed(t).set_modified(t)))
        .unwrap_or_else(|e| panic!("Failed to set times on {}: {}", path.display(), e));
}

/// Builder for one fixture venv
pub struct VenvFixture {
    age_days: u64,
    payload_bytes: usize,
    packages: Vec<&'static str>,
    with_python: bool,
}

impl VenvFixture {
    pub fn aged(age_days: u64) -> Self {
        Self {
            age_days,
            payload_bytes: 0,
            packages: Vec::new(),
            with_python: true,
        }
    }

    /// Extra bytes written into site-packages
    pub fn payload(mut self, bytes: usize) -> Self {
        self.payload_bytes = bytes;
        self
    }

    pub fn package(mut self, dist_info: &'static str) -> Self {
        self.packages.push(dist_info);
        self
    }

    /// Leave out the interpreter (a corrupted venv)
    pub fn without_python(mut self) -> Self {
        self.with_python = false;
        self
    }

    pub fn create(self, venv: &Path) {
        let (lib, include, python, activate) = if cfg!(windows) {
            ("Lib/site-packages", "Include", "python.exe", "activate.bat")
        } else {
            ("lib/python3.12/site-packages", "include", "python", "activate")
        };
        let bin = venv.join(bin_dir());
        let site = venv.join(lib);
        for dir in [&bin, &site, &venv.join(include)] {
            fs::create_dir_all(dir).expect("Failed to create venv dir");
        }

        fs::write(venv.join("pyvenv.cfg"), "home = /usr/bin\nversion = 3.12.1\nuv = 0.4.0\n")
            .expect("Failed to write pyvenv.cfg");
        fs::write(bin.join(activate), "# activate\n").expect("Failed to write activate");
        if self.with_python {
            fs::write(bin.join(python), "").expect("Failed to write python");
        }

        for pkg in &self.packages {
            fs::create_dir_all(site.join(pkg)).expect("Failed to create dist-info");
        }
        if self.payload_bytes > 0 {
            fs::write(site.join("payload.bin"), vec![0u8; self.payload_bytes])
                .expect("Failed to write payload");
        }

        set_age(&venv.join("pyvenv.cfg"), self.age_days);
        set_age(&bin.join(activate), self.age_days);
        if self.with_python {
            set_age(&bin.join(python), self.age_days);
        }
    }
}

/// Create a healthy venv aged `age_days`
pub fn make_venv(venv: &Path, age_days: u64) {
    VenvFixture::aged(age_days).create(venv);
}
