fn main() {
    std::process::exit(testplugins::app::startup::startup());
}
