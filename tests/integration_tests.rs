use bluray_mpls::{
    load_app_info_playlist, load_extension_data, load_movie_playlist, load_playlist,
    load_playlist_marks, CharacterCode, LanguageCode, MarkType, Mpls, MplsError, PlaybackType,
    SectionKind, StreamAttributes, StreamCategory, StreamEntry, StreamPid,
};
use std::io::{Cursor, Seek, SeekFrom};

fn with_u8_length(body: Vec<u8>) -> Vec<u8> {
    let mut data = vec![body.len() as u8];
    data.extend(body);
    data
}

fn with_u16_length(body: Vec<u8>) -> Vec<u8> {
    let mut data = (body.len() as u16).to_be_bytes().to_vec();
    data.extend(body);
    data
}

fn with_u32_length(body: Vec<u8>) -> Vec<u8> {
    let mut data = (body.len() as u32).to_be_bytes().to_vec();
    data.extend(body);
    data
}

fn stream(entry: &[u8], attrs: &[u8]) -> Vec<u8> {
    let mut entry = entry.to_vec();
    // real discs pad stream entries to 9 bytes
    entry.resize(9, 0);
    let mut data = with_u8_length(entry);
    data.extend(with_u8_length(attrs.to_vec()));
    data
}

fn stn_table(counts: [u8; 8], streams: Vec<Vec<u8>>) -> Vec<u8> {
    let mut body = vec![0x00, 0x00];
    body.extend_from_slice(&counts);
    body.extend_from_slice(&[0x00; 4]);
    body.extend(streams.into_iter().flatten());
    with_u16_length(body)
}

fn play_item(name: &[u8; 5], angles: &[&[u8; 5]], stn: Vec<u8>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(name);
    body.extend_from_slice(b"M2TS");
    let flags: u16 = if angles.is_empty() { 0x0001 } else { 0x0801 };
    body.extend_from_slice(&flags.to_be_bytes());
    body.push(0x00);
    body.extend_from_slice(&27_000_000u32.to_be_bytes());
    body.extend_from_slice(&27_450_000u32.to_be_bytes());
    body.extend_from_slice(&[0x00; 8]);
    body.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    if !angles.is_empty() {
        body.push(angles.len() as u8 + 1);
        body.push(0x01);
        for angle in angles {
            body.extend_from_slice(&angle[..]);
            body.extend_from_slice(b"M2TS");
            body.push(0x00);
        }
    }
    body.extend(stn);
    with_u16_length(body)
}

fn sub_path() -> Vec<u8> {
    let mut item = Vec::new();
    item.extend_from_slice(b"00200M2TS");
    item.extend_from_slice(&[0x00; 4]);
    item.push(0x00);
    item.extend_from_slice(&27_000_000u32.to_be_bytes());
    item.extend_from_slice(&27_450_000u32.to_be_bytes());
    item.extend_from_slice(&0u16.to_be_bytes());
    item.extend_from_slice(&27_000_000u32.to_be_bytes());

    let mut body = vec![0x00, 0x05, 0x00, 0x00, 0x00, 0x01];
    body.extend(with_u16_length(item));
    with_u32_length(body)
}

fn playlist() -> Vec<u8> {
    let main_stn = stn_table(
        [1, 1, 1, 0, 0, 0, 0, 0],
        vec![
            stream(&[0x01, 0x10, 0x11], &[0x1B, 0x61]),
            stream(&[0x01, 0x11, 0x00], &[0x83, 0x61, b'e', b'n', b'g']),
            stream(&[0x01, 0x12, 0x00], &[0x90, b'e', b'n', b'g']),
        ],
    );
    let angle_stn = stn_table(
        [1, 0, 0, 0, 0, 0, 0, 0],
        vec![stream(&[0x01, 0x10, 0x11], &[0x1B, 0x61])],
    );

    let mut body = vec![0x00, 0x00, 0x00, 0x02, 0x00, 0x01];
    body.extend(play_item(b"00055", &[], main_stn));
    body.extend(play_item(b"00059", &[b"00060", b"00061"], angle_stn));
    body.extend(sub_path());
    with_u32_length(body)
}

fn marks() -> Vec<u8> {
    let mut body = vec![0x00, 0x02];
    body.extend_from_slice(&[0x00, 0x01, 0x00, 0x00]);
    body.extend_from_slice(&27_000_000u32.to_be_bytes());
    body.extend_from_slice(&[0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00]);
    body.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    body.extend_from_slice(&27_000_000u32.to_be_bytes());
    body.extend_from_slice(&[0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00]);
    with_u32_length(body)
}

fn extension_data() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&0x18u32.to_be_bytes());
    body.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
    body.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    body.extend_from_slice(&0x18u32.to_be_bytes());
    body.extend_from_slice(&4u32.to_be_bytes());
    body.extend_from_slice(&[0x00; 4]);
    with_u32_length(body)
}

fn app_info(playback_type: u8) -> Vec<u8> {
    let mut body = vec![playback_type, 0x00, 0x00];
    body.extend_from_slice(&[0x00; 8]);
    body.extend_from_slice(&[0x40, 0x00]);
    with_u32_length(body)
}

/// Assembles a complete file. Returns the bytes and the three section addresses.
fn mpls_file(with_extension: bool) -> (Vec<u8>, [u32; 3]) {
    let app_info = app_info(0x01);
    let playlist = playlist();
    let marks = marks();

    let playlist_addr = 40 + app_info.len() as u32;
    let marks_addr = playlist_addr + playlist.len() as u32;
    let ext_addr = if with_extension {
        marks_addr + marks.len() as u32
    } else {
        0
    };

    let mut data = b"MPLS0200".to_vec();
    data.extend_from_slice(&playlist_addr.to_be_bytes());
    data.extend_from_slice(&marks_addr.to_be_bytes());
    data.extend_from_slice(&ext_addr.to_be_bytes());
    data.extend_from_slice(&[0x00; 20]);
    data.extend(app_info);
    data.extend(playlist);
    data.extend(marks);
    if with_extension {
        data.extend(extension_data());
    }

    (data, [playlist_addr, marks_addr, ext_addr])
}

#[test]
fn complete_file() {
    let (data, _) = mpls_file(true);

    let mpls = Mpls::parse(&data).unwrap();
    assert_eq!(mpls.header.type_indicator, "MPLS");
    assert_eq!(mpls.header.version_number, "0200");

    let app_info = mpls.app_info_playlist.get().unwrap();
    assert_eq!(app_info.playback_type, PlaybackType::Standard);
    assert_eq!(app_info.playback_count, None);

    let playlist = mpls.playlist.get().unwrap();
    assert_eq!(playlist.play_items.len(), 2);
    assert_eq!(playlist.sub_paths.len(), 1);

    let sub_path = playlist.sub_paths[0].get().unwrap();
    assert_eq!(sub_path.sub_path_type, 5);
    assert_eq!(
        sub_path.sub_play_items[0].get().unwrap().clip.file_name,
        "00200"
    );

    let marks = &mpls.marks.get().unwrap().marks;
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].mark_type, MarkType::EntryPoint);
    assert_eq!(marks[1].ref_to_play_item_id, 1);
    assert_eq!(marks[1].mark_timestamp.seconds(), 600.0);

    let ext = mpls.extension_data.unwrap().data.unwrap();
    assert_eq!(ext.entries.len(), 1);
    assert_eq!(ext.entries[0].ext_data_length, 4);
}

#[test]
fn complete_file_from_reader() {
    let (data, _) = mpls_file(false);

    let mpls = Mpls::from_reader(&data[..]).unwrap();
    assert!(mpls.extension_data.is_none());
    assert_eq!(mpls.play_items().count(), 2);
}

#[test]
fn streams_of_main_play_item() {
    let (data, _) = mpls_file(true);
    let mpls = Mpls::parse(&data).unwrap();

    let item = mpls.play_items().next().unwrap();
    assert!(!item.is_multi_angle);
    let stn = item.stn_table.get().unwrap();
    assert_eq!(stn.counts(), [1, 1, 1, 0, 0, 0, 0, 0]);

    let video = &stn.category(StreamCategory::PrimaryVideo)[0];
    assert_eq!(
        video.entry.data,
        Some(StreamEntry::PlayItem {
            ref_to_stream_pid: StreamPid(0x1011)
        })
    );
    let attrs = video.attributes.get().unwrap();
    assert_eq!(attrs.frame_rate().map(|f| (f.numerator, f.denominator)), Some((24_000, 1_001)));

    let audio = &stn.category(StreamCategory::PrimaryAudio)[0];
    assert_eq!(
        audio.attributes.get().and_then(StreamAttributes::language_code),
        Some(&LanguageCode::Text("eng".into()))
    );
    assert_eq!(
        audio.attributes.get().and_then(StreamAttributes::coding_type_name),
        Some("Dolby Digital TrueHD audio stream (primary audio)")
    );
}

#[test]
fn multi_angle_count() {
    let (data, _) = mpls_file(true);
    let mpls = Mpls::parse(&data).unwrap();

    assert_eq!(mpls.angles().len(), 3);
}

#[test]
fn segments_outlive_angle_handle() {
    let (data, _) = mpls_file(false);
    let mpls = Mpls::parse(&data).unwrap();

    let first = mpls.angles()[0].segments();
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].file_name, "00059");
}

#[test]
fn multi_angle_segments() {
    let (data, _) = mpls_file(true);
    let mpls = Mpls::parse(&data).unwrap();

    let segments: Vec<Vec<&str>> = mpls
        .angles()
        .iter()
        .map(|a| a.segments().iter().map(|s| s.file_name.as_ref()).collect())
        .collect();

    assert_eq!(
        segments,
        vec![
            vec!["00055", "00059"],
            vec!["00055", "00060"],
            vec!["00055", "00061"],
        ]
    );
}

#[test]
fn loaders_follow_header_addresses() {
    let (data, [playlist_addr, marks_addr, ext_addr]) = mpls_file(true);
    let mut cursor = Cursor::new(data);

    let header = load_movie_playlist(&mut cursor).unwrap();
    assert_eq!(header.playlist_start_address, playlist_addr);
    assert_eq!(header.playlist_mark_start_address, marks_addr);
    assert_eq!(header.extension_data_start_address, ext_addr);
    assert_eq!(cursor.position(), 40);

    let app_info = load_app_info_playlist(&mut cursor).unwrap();
    assert_eq!(cursor.position(), u64::from(playlist_addr));
    assert_eq!(cursor.position(), 40 + 4 + u64::from(app_info.length));

    let playlist = load_playlist(&mut cursor).unwrap();
    assert_eq!(
        cursor.position(),
        u64::from(playlist_addr) + 4 + u64::from(playlist.length)
    );
    assert_eq!(cursor.position(), u64::from(marks_addr));

    let marks = load_playlist_marks(&mut cursor).unwrap();
    assert_eq!(marks.data.unwrap().marks.len(), 2);
    assert_eq!(cursor.position(), u64::from(ext_addr));

    let ext = load_extension_data(&mut cursor).unwrap();
    assert_eq!(ext.length, 0x18);
    assert_eq!(cursor.position(), cursor.get_ref().len() as u64);
}

#[test]
fn movie_playlist_header_literal() {
    let mut data = b"MPLS0200".to_vec();
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x3A]);
    data.extend_from_slice(&[0x00, 0x00, 0x01, 0x00]);
    data.extend_from_slice(&[0x12, 0x34, 0x56, 0x78]);
    data.extend_from_slice(&[0x00; 20]);

    let header = load_movie_playlist(&mut Cursor::new(data)).unwrap();
    assert_eq!(header.type_indicator, "MPLS");
    assert_eq!(header.version_number, "0200");
    assert_eq!(header.playlist_start_address, 0x3A);
    assert_eq!(header.playlist_mark_start_address, 0x100);
    assert_eq!(header.extension_data_start_address, 0x1234_5678);
}

#[test]
fn movie_playlist_must_start_at_zero() {
    let (data, _) = mpls_file(true);
    let mut cursor = Cursor::new(data);
    cursor.seek(SeekFrom::Start(8)).unwrap();

    let err = load_movie_playlist(&mut cursor).unwrap_err();
    assert!(matches!(err, MplsError::NotAtFileStart { offset: 8 }));
}

#[test]
fn playlist_marks_without_marks() {
    let data = vec![0xAA, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0xBB];
    let mut cursor = Cursor::new(data);
    cursor.seek(SeekFrom::Start(1)).unwrap();

    let marks = load_playlist_marks(&mut cursor).unwrap();
    assert_eq!(marks.length, 2);
    assert!(marks.data.unwrap().marks.is_empty());
    assert_eq!(cursor.position(), 1 + 2 + 4);
}

#[test]
fn zero_length_sections() {
    let mut cursor = Cursor::new(vec![0x00; 8]);

    assert!(load_playlist(&mut cursor).unwrap().is_empty());
    assert_eq!(cursor.position(), 4);
    assert!(load_extension_data(&mut cursor).unwrap().is_empty());
    assert_eq!(cursor.position(), 8);
}

#[test]
fn future_fields_are_skipped() {
    let mut app_info = app_info(0x02);
    // grow the declared length by six bytes of unknown data
    app_info[3] += 6;
    app_info.extend_from_slice(&[0x5A; 6]);
    app_info.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let mut cursor = Cursor::new(app_info);
    let section = load_app_info_playlist(&mut cursor).unwrap();
    assert_eq!(section.length, 19);
    assert_eq!(section.data.unwrap().playback_type, PlaybackType::Random);
    assert_eq!(cursor.position(), 4 + 19);

    assert!(load_playlist_marks(&mut cursor).unwrap().is_empty());
}

#[test]
fn unrecognized_codes_do_not_stop_decoding() {
    let stn = stn_table(
        [0, 0, 2, 0, 0, 0, 0, 0],
        vec![
            stream(&[0x09, 0x12, 0x00], &[0xFF, 0x01, 0x02]),
            stream(&[0x01, 0x12, 0x01], &[0x92, 0x0B, b'j', b'p', b'n']),
        ],
    );
    let mut body = vec![0x00, 0x00, 0x00, 0x01, 0x00, 0x00];
    body.extend(play_item(b"00070", &[], stn));
    let data = with_u32_length(body);
    let len = data.len() as u64;

    let mut cursor = Cursor::new(data);
    let playlist = load_playlist(&mut cursor).unwrap();
    assert_eq!(cursor.position(), len);

    let playlist = playlist.data.unwrap();
    let stn = playlist.play_items[0].get().unwrap().stn_table.get().unwrap();
    let pg = stn.category(StreamCategory::PrimaryPg);
    assert_eq!(pg.len(), 2);

    assert_eq!(pg[0].entry.data, Some(StreamEntry::Unrecognized(0x09)));
    assert_eq!(pg[0].attributes.data, Some(StreamAttributes::Unrecognized(0xFF)));
    assert_eq!(
        pg[1].attributes.data,
        Some(StreamAttributes::Text {
            character_code: CharacterCode::Unrecognized(0x0B),
            language_code: LanguageCode::Raw(*b"jpn"),
        })
    );
}

#[test]
fn truncated_playlist() {
    let (mut data, [playlist_addr, _, _]) = mpls_file(false);
    data.truncate(playlist_addr as usize + 60);

    let mut cursor = Cursor::new(data);
    cursor.seek(SeekFrom::Start(u64::from(playlist_addr))).unwrap();

    match load_playlist(&mut cursor) {
        Err(MplsError::TruncatedInput { offset, .. }) => {
            assert!(offset <= u64::from(playlist_addr) + 60);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn invalid_clip_name_reports_offset() {
    let stn = stn_table([0; 8], vec![]);
    let mut item = play_item(b"00055", &[], stn);
    item[2] = 0xFF;
    let mut body = vec![0x00, 0x00, 0x00, 0x01, 0x00, 0x00];
    body.extend(item);
    let data = with_u32_length(body);

    match load_playlist(&mut Cursor::new(data)) {
        Err(MplsError::Decode {
            section,
            offset,
            bytes,
            ..
        }) => {
            assert_eq!(section, SectionKind::PlayItem);
            assert_eq!(offset, 4 + 6 + 2);
            assert_eq!(bytes, b"\xFF0055".to_vec());
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
