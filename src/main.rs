fn main() {
    aca_deploy::app::cli::run();
}
