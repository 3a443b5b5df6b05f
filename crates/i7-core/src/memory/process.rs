//! Live process access (Windows only).

use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::MemoryAccessor;
#[cfg(target_os = "windows")]
use crate::memory::access::ensure_len;

/// Basic information about a running process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
}

/// An open handle to a target process, closed on drop.
pub struct ProcessHandle {
    pub pid: u32,
    #[cfg(target_os = "windows")]
    handle: windows::Win32::Foundation::HANDLE,
}

#[cfg(target_os = "windows")]
impl ProcessHandle {
    /// Find a running process by executable name (case-insensitive)
    pub fn find(name: &str) -> Result<ProcessInfo> {
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Diagnostics::ToolHelp::{
            CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
            TH32CS_SNAPPROCESS,
        };

        // SAFETY: the snapshot handle is checked and closed before returning.
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
                .map_err(|e| Error::ProcessOpenFailed(format!("process snapshot: {}", e)))?;

            let mut entry = PROCESSENTRY32W {
                dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
                ..Default::default()
            };

            let mut found = None;
            let mut more = Process32FirstW(snapshot, &mut entry).is_ok();
            while more {
                let len = entry
                    .szExeFile
                    .iter()
                    .position(|&c| c == 0)
                    .unwrap_or(entry.szExeFile.len());
                let exe = String::from_utf16_lossy(&entry.szExeFile[..len]);
                if exe.eq_ignore_ascii_case(name) {
                    found = Some(ProcessInfo {
                        pid: entry.th32ProcessID,
                        name: exe,
                    });
                    break;
                }
                more = Process32NextW(snapshot, &mut entry).is_ok();
            }

            let _ = CloseHandle(snapshot);
            found.ok_or_else(|| Error::ProcessNotFound(name.to_string()))
        }
    }

    /// Open a process for reading and writing
    pub fn open(pid: u32) -> Result<Self> {
        use windows::Win32::Foundation::BOOL;
        use windows::Win32::System::Threading::{
            OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_OPERATION, PROCESS_VM_READ,
            PROCESS_VM_WRITE,
        };

        let access =
            PROCESS_VM_READ | PROCESS_VM_WRITE | PROCESS_VM_OPERATION | PROCESS_QUERY_INFORMATION;

        // SAFETY: OpenProcess has no preconditions; the handle is owned by Self.
        let handle = unsafe { OpenProcess(access, BOOL::from(false), pid) }
            .map_err(|e| Error::ProcessOpenFailed(format!("pid {}: {}", pid, e)))?;

        Ok(Self { pid, handle })
    }

    /// Find a process by name and open it
    pub fn find_and_open(name: &str) -> Result<Self> {
        let info = Self::find(name)?;
        debug!("Found {} (PID: {})", info.name, info.pid);
        Self::open(info.pid)
    }

    pub fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

        let mut buffer = vec![0u8; size];
        let mut read = 0usize;

        // SAFETY: buffer is valid for `size` bytes for the duration of the call.
        unsafe {
            ReadProcessMemory(
                self.handle,
                address as *const _,
                buffer.as_mut_ptr().cast(),
                size,
                Some(&mut read),
            )
        }
        .map_err(|e| Error::MemoryReadFailed {
            address,
            message: e.to_string(),
        })?;

        buffer.truncate(read);
        ensure_len(&buffer, address, size)?;
        Ok(buffer)
    }

    pub fn write_bytes(&self, address: u64, bytes: &[u8]) -> Result<()> {
        use windows::Win32::System::Diagnostics::Debug::WriteProcessMemory;

        let mut written = 0usize;

        // SAFETY: bytes is valid for its length for the duration of the call.
        unsafe {
            WriteProcessMemory(
                self.handle,
                address as *const _,
                bytes.as_ptr().cast(),
                bytes.len(),
                Some(&mut written),
            )
        }
        .map_err(|e| Error::MemoryWriteFailed {
            address,
            message: e.to_string(),
        })?;

        if written != bytes.len() {
            return Err(Error::MemoryWriteFailed {
                address,
                message: format!("wrote {} of {} bytes", written, bytes.len()),
            });
        }
        Ok(())
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        use windows::Win32::Foundation::CloseHandle;
        // SAFETY: the handle came from OpenProcess and is closed exactly once.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

#[cfg(not(target_os = "windows"))]
impl ProcessHandle {
    pub fn find(name: &str) -> Result<ProcessInfo> {
        Err(Error::ProcessNotFound(format!(
            "{} (process access is only supported on Windows)",
            name
        )))
    }

    pub fn open(pid: u32) -> Result<Self> {
        Err(Error::ProcessOpenFailed(format!(
            "pid {} (process access is only supported on Windows)",
            pid
        )))
    }

    pub fn find_and_open(name: &str) -> Result<Self> {
        let info = Self::find(name)?;
        Self::open(info.pid)
    }

    pub fn read_bytes(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
        Err(Error::MemoryReadFailed {
            address,
            message: "unsupported platform".to_string(),
        })
    }

    pub fn write_bytes(&self, address: u64, _bytes: &[u8]) -> Result<()> {
        Err(Error::MemoryWriteFailed {
            address,
            message: "unsupported platform".to_string(),
        })
    }
}

/// [`MemoryAccessor`] over live processes.
///
/// The target is resolved by name on every call, so a restarted game is
/// picked up without reattaching.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessMemory;

impl ProcessMemory {
    pub fn new() -> Self {
        Self
    }
}

impl MemoryAccessor for ProcessMemory {
    fn read_bytes(&self, process: &str, address: u64, size: usize) -> Result<Vec<u8>> {
        ProcessHandle::find_and_open(process)?.read_bytes(address, size)
    }

    fn write_bytes(&self, process: &str, address: u64, bytes: &[u8]) -> Result<()> {
        debug!("Writing {} bytes at 0x{:X}", bytes.len(), address);
        ProcessHandle::find_and_open(process)?.write_bytes(address, bytes)
    }
}
