use std::process::Command;

fn main() {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    else {
        return;
    };
    let installed = String::from_utf8_lossy(&output.stdout);
    if !installed
        .lines()
        .any(|l| l.trim() == "wasm32-unknown-unknown")
    {
        println!(
            "cargo:warning=wasm32-unknown-unknown target not installed; \
             run `rustup target add wasm32-unknown-unknown` before building the web bundle"
        );
    }
}
