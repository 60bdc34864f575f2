use std::io::Cursor;

use autorun::exec::shebang::{parse_shebang, read_shebang, ShebangError};

#[test]
fn splits_interpreter_and_arguments_on_whitespace() {
    assert_eq!(
        parse_shebang(b"#!/bin/sh -e\n").unwrap(),
        vec!["/bin/sh", "-e"]
    );
    assert_eq!(
        parse_shebang(b"#!/usr/bin/env  python3\t-u\r\n").unwrap(),
        vec!["/usr/bin/env", "python3", "-u"]
    );
    assert_eq!(parse_shebang(b"#! /bin/bash").unwrap(), vec!["/bin/bash"]);
}

#[test]
fn tolerates_a_leading_byte_order_mark() {
    assert_eq!(
        parse_shebang(b"\xEF\xBB\xBF#!/bin/sh\n").unwrap(),
        vec!["/bin/sh"]
    );
}

#[test]
fn rejects_lines_without_a_usable_directive() {
    assert_eq!(parse_shebang(b"echo hi\n"), Err(ShebangError::Missing));
    assert_eq!(parse_shebang(b" #!/bin/sh\n"), Err(ShebangError::Missing));
    assert_eq!(parse_shebang(b""), Err(ShebangError::Missing));
    assert_eq!(parse_shebang(b"#!\n"), Err(ShebangError::Empty));
    assert_eq!(parse_shebang(b"#!/bin/\xFFsh\n"), Err(ShebangError::NotUtf8));
}

#[test]
fn only_the_first_line_is_considered() {
    let script = "# comment\n#!/bin/sh\n";
    assert_eq!(
        read_shebang(Cursor::new(script)),
        Err(ShebangError::Missing)
    );

    let script = "#!/bin/dash\n#!/bin/bash\necho hi\n";
    assert_eq!(read_shebang(Cursor::new(script)).unwrap(), vec!["/bin/dash"]);
}
