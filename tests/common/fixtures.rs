//! Static record corpora used across harnesses.
//!
//! Extractor records use the field names LECmd, JLECmd, PECmd and MFTECmd
//! write, including their seven-digit fractional seconds.

use serde_json::{json, Value};

/// Syslog lines covering every matcher.
pub const CORPUS_SYSLOG: &[&str] = &[
    "Jan 15 10:00:02 myhost sshd[12345]: Failed password for invalid user admin from 10.0.0.1 port 54321 ssh2",
    "Jan 15 10:00:03 myhost kernel: [ 1234.567890] usb 1-1: new high-speed USB device number 2",
    "Jan  9 08:07:06 CRON[991]: (root) CMD (run-parts /etc/cron.hourly)",
    "Jan 14 23:59:59.123 myhost systemd[1]: Started Session 4 of user root.",
    "UTC Jan 15 00:00:01 anacron: Job `cron.daily' terminated",
    "Dec 31 23:59:59 myhost kernel: Linux version 6.1.0",
    "-- MARK --",
];

/// LECmd, flat CSV-style output.
pub fn lecmd_flat() -> Value {
    json!({
        "SourceFile": "C:\\Users\\alice\\AppData\\Roaming\\Microsoft\\Windows\\Recent\\report.docx.lnk",
        "SourceCreated": "2023-05-02T09:15:00.1234567+00:00",
        "SourceModified": "2023-05-02T09:15:00.1234567+00:00",
        "SourceAccessed": "2023-05-03T10:00:00.0000000+00:00",
        "TargetCreated": "2023-04-30T08:00:00.1111111+00:00",
        "TargetModified": "2023-05-01T17:45:12.9876543+00:00",
        "TargetAccessed": "",
        "FileSize": "48213",
        "FileAttributes": "FileAttributeArchive",
        "LocalPath": "C:\\Users\\alice\\Documents\\report.docx",
        "TargetIDAbsolutePath": "My Computer\\C:\\Users\\alice\\Documents\\report.docx",
        "WorkingDirectory": "C:\\Users\\alice\\Documents",
        "DriveType": "Fixed storage media (Hard drive)",
        "VolumeSerialNumber": "A4B2-11C0",
        "MachineID": "desktop-01",
        "MachineMACAddress": "00:0c:29:aa:bb:cc",
        "TrackerCreatedOn": "2023-04-30T08:00:01.0000000+00:00",
    })
}

/// LECmd, nested JSON output with target metadata under `Header`.
pub fn lecmd_nested() -> Value {
    json!({
        "SourceFile": "C:\\Users\\bob\\Desktop\\tools.lnk",
        "SourceCreated": "/Date(1672531200000)/",
        "Header": {
            "TargetCreationDate": "/Date(1672444800000)/",
            "TargetModificationDate": "/Date(1672448400000+0000)/",
            "TargetLastAccessedDate": "/Date(1672452000000)/",
            "FileSize": 0,
            "FileAttributes": "FileAttributeDirectory",
        },
        "LocalPath": "C:\\Tools",
    })
}

/// JLECmd, automatic destinations entry with its embedded shortcut.
pub fn jlecmd_automatic() -> Value {
    json!({
        "SourceFile": "C:\\Users\\alice\\AppData\\Roaming\\Microsoft\\Windows\\Recent\\AutomaticDestinations\\5f7b5f1e01b83767.automaticDestinations-ms",
        "AppId": "5f7b5f1e01b83767",
        "AppIdDescription": "Quick Access",
        "CreatedOn": "2023-05-01T08:00:00.0000000+00:00",
        "LastModified": "2023-05-02T08:00:00.0000000+00:00",
        "MRUPosition": "0",
        "Path": "C:\\Users\\alice\\Documents\\notes.txt",
        "EntryNumber": "3",
        "Hostname": "desktop-01",
        "Pinned": "False",
        "InteractionCount": "7",
        "Lnk": {
            "TargetCreated": "2023-04-01T00:00:00.0000000+00:00",
            "TargetModified": "2023-04-02T00:00:00.0000000+00:00",
            "LocalPath": "C:\\Users\\alice\\Documents\\notes.txt",
        },
    })
}

/// JLECmd, custom destinations entry.
pub fn jlecmd_custom() -> Value {
    json!({
        "SourceFile": "C:\\Users\\alice\\AppData\\Roaming\\Microsoft\\Windows\\Recent\\CustomDestinations\\9b9cdc69c1c24e2b.customDestinations-ms",
        "AppId": "9b9cdc69c1c24e2b",
        "Rank": "1",
        "Name": "Tasks",
        "TargetAccessed": "2023-03-03T03:03:03.0000000+00:00",
        "LocalPath": "C:\\Windows\\System32\\notepad.exe",
    })
}

/// PECmd entry with two runs and one volume.
pub fn pecmd() -> Value {
    json!({
        "SourceFilename": "C:\\Windows\\Prefetch\\CMD.EXE-0BD30981.pf",
        "SourceCreated": "2023-01-01T00:00:00.0000000+00:00",
        "ExecutableName": "CMD.EXE",
        "Hash": "0BD30981",
        "Size": "12345",
        "Version": "Windows 10 or Windows 11",
        "RunCount": "2",
        "LastRun": "2023-06-01T12:00:00.5000000+00:00",
        "PreviousRun0": "2023-05-31T11:00:00.2500000+00:00",
        "PreviousRun1": "",
        "Volume0Name": "\\VOLUME{01d8a6e3b7c1f2a0-a4b211c0}",
        "Volume0Serial": "A4B211C0",
        "Volume0Created": "2022-07-01T00:00:00.0000000+00:00",
        "Directories": "\\VOLUME{01d8a6e3b7c1f2a0-a4b211c0}\\WINDOWS, \\VOLUME{01d8a6e3b7c1f2a0-a4b211c0}\\WINDOWS\\SYSTEM32",
        "FilesLoaded": "\\VOLUME{01d8a6e3b7c1f2a0-a4b211c0}\\WINDOWS\\SYSTEM32\\NTDLL.DLL, \\VOLUME{01d8a6e3b7c1f2a0-a4b211c0}\\WINDOWS\\SYSTEM32\\KERNEL32.DLL",
    })
}

/// MFTECmd entry with all four standard-information times.
pub fn mftecmd() -> Value {
    json!({
        "EntryNumber": "101234",
        "SequenceNumber": "4",
        "InUse": "True",
        "ParentEntryNumber": "5",
        "ParentPath": ".\\Users\\alice\\Downloads",
        "FileName": "payload.exe",
        "Extension": ".exe",
        "FileSize": "73802",
        "IsDirectory": "False",
        "HasAds": "True",
        "SI<FN": "True",
        "uSecZeros": "False",
        "Created0x10": "2021-02-01T10:00:00.0000000+00:00",
        "Created0x30": "2023-02-01T10:00:00.0000000+00:00",
        "LastModified0x10": "2021-02-02T10:00:00.0000000+00:00",
        "LastRecordChange0x10": "2023-02-03T10:00:00.0000000+00:00",
        "LastAccess0x10": "2023-02-04T10:00:00.0000000+00:00",
    })
}

/// Generate `n` PECmd-shaped records for throughput testing.
pub fn corpus_high_volume(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "SourceFilename": format!("C:\\Windows\\Prefetch\\APP{i}.EXE-{i:08X}.pf"),
                "ExecutableName": format!("APP{i}.EXE"),
                "RunCount": (i % 8 + 1).to_string(),
                "LastRun": format!("2023-06-01T{:02}:{:02}:{:02}.1234567+00:00", i / 3600 % 24, i / 60 % 60, i % 60),
                "PreviousRun0": "2023-05-01T00:00:00.0000000+00:00",
            })
        })
        .collect()
}
