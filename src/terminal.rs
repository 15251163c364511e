//! Terminal device queries.

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Size of the terminal on standard output as `(columns, rows)`.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    size_of_fd(libc::STDOUT_FILENO)
}

/// Size of the terminal behind `fd` as `(columns, rows)`.
///
/// Zero dimensions are reported as an error.
pub fn terminal_size_of<F: AsRawFd>(fd: &F) -> io::Result<(u16, u16)> {
    size_of_fd(fd.as_raw_fd())
}

fn size_of_fd(fd: RawFd) -> io::Result<(u16, u16)> {
    // SAFETY: winsize is plain old data; all-zero is a valid value
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        tracing::trace!(cols = size.ws_col, rows = size.ws_row, "terminal size");
        Ok((size.ws_col, size.ws_row))
    }
}
