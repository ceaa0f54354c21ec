use memhog::fill::{self, Pattern};
use memhog::region::{Region, WORD, grow_to_failure};
use memhog::sys;

#[test]
fn exact_acquisition_is_exact_and_zeroed() {
    let region = Region::exact(4096).expect("small allocation");
    assert_eq!(region.len(), 4096);
    assert!(region.as_bytes().iter().all(|b| *b == 0));
}

#[test]
fn exact_zero_bytes_is_empty() {
    let region = Region::exact(0).expect("empty allocation");
    assert!(region.is_empty());
}

#[test]
fn dense_zero_overwrites_every_byte() {
    let mut region = Region::exact(8 * 1024).expect("small allocation");
    let mut offset = 0;
    while offset + WORD <= region.len() {
        region.write_word(offset, 0xDEAD_BEEF);
        offset += WORD;
    }

    fill::fill(&mut region, Pattern::Zero, true);
    assert!(region.as_bytes().iter().all(|b| *b == 0));
}

#[test]
fn dense_random_writes_words() {
    let mut region = Region::exact(1024).expect("small allocation");
    fill::fill(&mut region, Pattern::Random, true);
    assert!(region.as_bytes().iter().any(|b| *b != 0));
}

#[test]
fn sparse_zero_touches_the_first_word_of_each_page() {
    let Some(page) = sys::page_size() else {
        // without page info sparse degrades to dense, nothing to assert here
        return;
    };
    let mut region = Region::exact(4 * page).expect("small allocation");
    let mut offset = 0;
    while offset + WORD <= region.len() {
        region.write_word(offset, u32::MAX);
        offset += page;
    }

    fill::fill(&mut region, Pattern::Zero, false);
    let mut offset = 0;
    while offset + WORD <= region.len() {
        assert_eq!(region.read_word(offset), 0);
        offset += page;
    }
}

#[test]
fn fill_stays_inside_an_odd_sized_region() {
    let mut region = Region::exact(10).expect("small allocation");
    fill::fill(&mut region, Pattern::Random, true);
    // the last two bytes cannot hold a whole word and must stay untouched
    assert_eq!(&region.as_bytes()[8..], &[0u8, 0][..]);
}

#[test]
fn growth_keeps_the_last_accepted_size() {
    let chunk = 4096;
    let limit = 10 * chunk;
    let grown = grow_to_failure(chunk, chunk, |_, next| next <= limit);
    assert_eq!(grown, limit);
    assert_eq!(grown % chunk, 0);
    assert!(grown < limit + chunk);
}

#[test]
fn growth_stops_at_the_first_refusal() {
    let grown = grow_to_failure(4096, 4096, |_, _| false);
    assert_eq!(grown, 4096);
}

#[test]
fn growth_survives_byte_counter_overflow() {
    let start = usize::MAX - 100;
    let grown = grow_to_failure(start, 4096, |_, _| true);
    assert_eq!(grown, start);
}

#[cfg(unix)]
#[test]
fn page_size_is_word_aligned() {
    if let Some(page) = sys::page_size() {
        assert!(page >= WORD);
        assert_eq!(page % WORD, 0);
    }
}
