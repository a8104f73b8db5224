fn main() {
    voice_faq_lib::run()
}
