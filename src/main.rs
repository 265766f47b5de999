mod app_main;

fn main() {
    app_main::main();
}
