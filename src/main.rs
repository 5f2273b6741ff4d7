fn main() {
    leave_dashboard::run();
}
