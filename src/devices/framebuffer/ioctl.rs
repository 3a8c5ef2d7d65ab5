//! Raw fbdev control calls and the kernel's screen-info layouts (`linux/fb.h`)
use std::io;
use std::os::fd::RawFd;

pub const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
pub const FBIOPUT_VSCREENINFO: libc::c_ulong = 0x4601;
pub const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FbBitfield {
    pub offset: u32,
    pub length: u32,
    pub msb_right: u32,
}

/// `struct fb_var_screeninfo`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FbVarScreenInfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    pub grayscale: u32,
    pub red: FbBitfield,
    pub green: FbBitfield,
    pub blue: FbBitfield,
    pub transp: FbBitfield,
    pub nonstd: u32,
    pub activate: u32,
    pub height: u32,
    pub width: u32,
    pub accel_flags: u32,
    pub pixclock: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub upper_margin: u32,
    pub lower_margin: u32,
    pub hsync_len: u32,
    pub vsync_len: u32,
    pub sync: u32,
    pub vmode: u32,
    pub rotate: u32,
    pub colorspace: u32,
    pub reserved: [u32; 4],
}

/// `struct fb_fix_screeninfo`
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FbFixScreenInfo {
    pub id: [u8; 16],
    pub smem_start: libc::c_ulong,
    pub smem_len: u32,
    pub type_: u32,
    pub type_aux: u32,
    pub visual: u32,
    pub xpanstep: u16,
    pub ypanstep: u16,
    pub ywrapstep: u16,
    pub line_length: u32,
    pub mmio_start: libc::c_ulong,
    pub mmio_len: u32,
    pub accel: u32,
    pub capabilities: u16,
    pub reserved: [u16; 2],
}

impl FbFixScreenInfo {
    /// Driver name, up to the first NUL.
    pub fn id(&self) -> String {
        let end = self.id.iter().position(|&b| b == 0).unwrap_or(self.id.len());
        String::from_utf8_lossy(&self.id[..end]).into_owned()
    }
}

pub fn get_var_screen_info(fd: RawFd) -> io::Result<FbVarScreenInfo> {
    let mut info = FbVarScreenInfo::default();
    // SAFETY: `info` is a valid, writable fb_var_screeninfo for the driver to fill.
    let ret = unsafe {
        libc::ioctl(
            fd,
            FBIOGET_VSCREENINFO as _,
            &mut info as *mut FbVarScreenInfo,
        )
    };
    if ret == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(info)
}

pub fn put_var_screen_info(fd: RawFd, info: &FbVarScreenInfo) -> io::Result<()> {
    // The driver may write back adjusted values, so hand it a private copy.
    let mut info = *info;
    // SAFETY: `info` is a valid fb_var_screeninfo that outlives the call.
    let ret = unsafe {
        libc::ioctl(
            fd,
            FBIOPUT_VSCREENINFO as _,
            &mut info as *mut FbVarScreenInfo,
        )
    };
    if ret == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

pub fn get_fix_screen_info(fd: RawFd) -> io::Result<FbFixScreenInfo> {
    let mut info = FbFixScreenInfo::default();
    // SAFETY: `info` is a valid, writable fb_fix_screeninfo for the driver to fill.
    let ret = unsafe {
        libc::ioctl(
            fd,
            FBIOGET_FSCREENINFO as _,
            &mut info as *mut FbFixScreenInfo,
        )
    };
    if ret == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(info)
}
