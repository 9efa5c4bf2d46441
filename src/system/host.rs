//! Host name lookup.

use std::ffi::CStr;

use crate::error::{IpiError, Result};

pub fn hostname() -> Result<String> {
    let mut buf = [0 as libc::c_char; 256];
    if unsafe { libc::gethostname(buf.as_mut_ptr(), buf.len()) } != 0 {
        return Err(IpiError::Io(std::io::Error::last_os_error()));
    }
    // Truncated names are not guaranteed to be terminated.
    buf[buf.len() - 1] = 0;

    let name = unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned();
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_is_not_empty() {
        assert!(!hostname().unwrap().is_empty());
    }
}
