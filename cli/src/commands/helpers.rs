use popmark::error::Result;
use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdout; anything but "y"/"yes" is a no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().lock().read_line(&mut response)?;
    Ok(is_yes(&response))
}

pub fn is_yes(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    response == "y" || response == "yes"
}
