fn main() {
    portfolio_site_lib::run()
}
