//! Framebuffer device lifecycle: open, query, map, restore on drop.
use std::fs::{File, OpenOptions};
use std::io;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::os::fd::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

use log::{info, warn};

use super::framebuffer::Geometry;
use super::ioctl::{self, FbFixScreenInfo, FbVarScreenInfo};
use crate::error::FbError;

/// An open `/dev/fbN` node.
///
/// Once [`save_mode`](Self::save_mode) has run, the captured variable info is
/// written back when the device is dropped, whatever happened in between.
pub struct FramebufferDevice {
    file: File,
    path: PathBuf,
    original: Option<FbVarScreenInfo>,
}

impl FramebufferDevice {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FbError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| FbError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        info!("The framebuffer device {} was opened successfully.", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
            original: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn var_screen_info(&self) -> Result<FbVarScreenInfo, FbError> {
        ioctl::get_var_screen_info(self.fd()).map_err(|source| FbError::Ioctl {
            request: "FBIOGET_VSCREENINFO",
            source,
        })
    }

    pub fn fix_screen_info(&self) -> Result<FbFixScreenInfo, FbError> {
        ioctl::get_fix_screen_info(self.fd()).map_err(|source| FbError::Ioctl {
            request: "FBIOGET_FSCREENINFO",
            source,
        })
    }

    pub fn put_var_screen_info(&self, info: &FbVarScreenInfo) -> Result<(), FbError> {
        ioctl::put_var_screen_info(self.fd(), info).map_err(|source| FbError::Ioctl {
            request: "FBIOPUT_VSCREENINFO",
            source,
        })
    }

    /// Capture the current mode so it is restored on drop.
    pub fn save_mode(&mut self) -> Result<FbVarScreenInfo, FbError> {
        let vinfo = self.var_screen_info()?;
        info!(
            "Original {}x{}, {}bpp",
            vinfo.xres, vinfo.yres, vinfo.bits_per_pixel
        );
        self.original = Some(vinfo);
        Ok(vinfo)
    }

    /// Ask the driver for a different bit depth. Failure leaves the current mode in place.
    pub fn set_depth(&self, bits_per_pixel: u32) -> Result<(), FbError> {
        let mut vinfo = self.var_screen_info()?;
        if vinfo.bits_per_pixel == bits_per_pixel {
            return Ok(());
        }
        vinfo.bits_per_pixel = bits_per_pixel;
        self.put_var_screen_info(&vinfo)?;
        info!("Switched to {}bpp", bits_per_pixel);
        Ok(())
    }

    /// Query the active layout, combining variable and fixed info.
    pub fn geometry(&self) -> Result<(Geometry, FbFixScreenInfo), FbError> {
        let vinfo = self.var_screen_info()?;
        let finfo = self.fix_screen_info()?;
        let geometry = Geometry::from_screen_info(&vinfo, &finfo);
        info!(
            "{}: {}x{}, {}bpp, line length {}, smem_len {}",
            finfo.id(),
            geometry.width,
            geometry.height,
            geometry.bits_per_pixel,
            geometry.stride,
            finfo.smem_len
        );
        Ok((geometry, finfo))
    }

    /// Map `len` bytes of device memory, shared and read-write, from offset 0.
    pub fn map(&self, len: usize) -> Result<Mapping<'_>, FbError> {
        // SAFETY: a fresh mapping chosen by the kernel; no existing memory is aliased.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                self.fd(),
                0,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(FbError::Map {
                len,
                source: io::Error::last_os_error(),
            });
        }

        let ptr = NonNull::new(addr.cast::<u8>()).ok_or_else(|| FbError::Map {
            len,
            source: io::Error::from(io::ErrorKind::InvalidData),
        })?;
        Ok(Mapping {
            ptr,
            len,
            _device: PhantomData,
        })
    }

    fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl Drop for FramebufferDevice {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            if let Err(e) = self.put_var_screen_info(&original) {
                warn!("Error re-setting variable information: {}", e);
            }
        }
    }
}

/// Device memory mapped into the process. Unmapped on drop.
///
/// Borrows the device so the mapping cannot outlive the descriptor, and is
/// therefore released before the original mode is restored.
pub struct Mapping<'a> {
    ptr: NonNull<u8>,
    len: usize,
    _device: PhantomData<&'a FramebufferDevice>,
}

impl Deref for Mapping<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // SAFETY: `ptr` is a live mapping of `len` bytes owned by `self`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for Mapping<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for Mapping<'_> {
    fn drop(&mut self) {
        // SAFETY: `ptr`/`len` describe exactly the region returned by mmap.
        let ret = unsafe { libc::munmap(self.ptr.as_ptr().cast(), self.len) };
        if ret == -1 {
            warn!("munmap failed: {}", io::Error::last_os_error());
        }
    }
}
