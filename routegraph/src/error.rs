use error_chain::error_chain;

error_chain! {
    foreign_links {
        Io(std::io::Error);
    }

    errors {
        MalformedRecord(line: usize, reason: String) {
            description("malformed edge record")
            display("malformed edge record in line {}: {}", line, reason)
        }
    }
}
