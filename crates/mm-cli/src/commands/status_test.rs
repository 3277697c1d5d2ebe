use super::*;

#[test]
fn test_render_table() {
    let status = vec![
        MigrationStatus {
            sequence_number: 202301010800,
            filename: "202301010800_masterfiles.yml".to_string(),
            applied: true,
        },
        MigrationStatus {
            sequence_number: 202302010900,
            filename: "202302010900_packaging.yml".to_string(),
            applied: false,
        },
    ];

    let table = render_table(&status);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("VERSION       FILE"));
    assert!(lines[2].ends_with("applied"));
    assert!(lines[3].starts_with("202302010900  202302010900_packaging.yml"));
    assert!(lines[3].ends_with("pending"));
}
