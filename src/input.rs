use anyhow::Result;
use std::io::{self, IsTerminal};
use zeroize::Zeroizing;

/// Read the plain text to hash or verify. `None` means nothing was provided.
pub fn read_text() -> Result<Option<Zeroizing<String>>> {
    //  Environment Variable
    //  SAFEGUARD_TEXT="supersecret" safeguard hash
    if let Ok(text) = std::env::var("SAFEGUARD_TEXT") {
        if !text.is_empty() {
            return Ok(Some(Zeroizing::new(text)));
        }
    }

    //  stdin (Pipeline)
    //  echo "supersecret" | safeguard hash
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_line(&mut buf)?;
        trim_newline(&mut buf);

        return Ok(non_empty(buf));
    }

    //  Interactive (TTY)
    let text = Zeroizing::new(rpassword::prompt_password("Text: ")?);
    Ok(non_empty(text))
}

fn non_empty(text: Zeroizing<String>) -> Option<Zeroizing<String>> {
    if text.is_empty() { None } else { Some(text) }
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
