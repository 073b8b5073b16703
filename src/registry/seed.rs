use super::model::{Category, InstallMethod, SizeUnit, SoftwareDraft};

/// Example entries a fresh session starts with.
pub fn seed_entries() -> Vec<SoftwareDraft> {
    vec![
        SoftwareDraft {
            name: "Chrome".into(),
            version: "v122.0.6261.69".into(),
            size: "85".into(),
            size_unit: SizeUnit::Mb,
            path: "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe".into(),
            description: "Google Chrome is a cross-platform web browser developed by Google."
                .into(),
            category: Category::Browsers,
            is_cracked: false,
            crack_instructions: None,
            install_method: InstallMethod::Normal,
        },
        SoftwareDraft {
            name: "Adobe Photoshop".into(),
            version: "v25.0".into(),
            size: "2.4".into(),
            size_unit: SizeUnit::Gb,
            path: "C:\\Program Files\\Adobe\\Adobe Photoshop 2024\\Photoshop.exe".into(),
            description: "Professional photo editing software developed by Adobe Inc.".into(),
            category: Category::Multimedia,
            is_cracked: false,
            crack_instructions: None,
            install_method: InstallMethod::Normal,
        },
        SoftwareDraft {
            name: "WinRAR".into(),
            version: "v6.24".into(),
            size: "3.5".into(),
            size_unit: SizeUnit::Mb,
            path: "C:\\Program Files\\WinRAR\\WinRAR.exe".into(),
            description: "File archiver utility for Windows that can create and view archives in RAR or ZIP file formats.".into(),
            category: Category::Utilities,
            is_cracked: false,
            crack_instructions: None,
            install_method: InstallMethod::Silent,
        },
    ]
}
