//! Lookup behaviour of a loaded forwarding table.
use rand::{rngs::SmallRng, Rng, SeedableRng};
use route_lookup_core::{
    fib::{Slot, MAIN_TABLE_SLOTS},
    subnetting::Ipv4Net,
    ForwardingTable, InsertError, Interface, Ipv4Address, RangeError, Resolution,
};

fn load(routes: &[(&str, u32)]) -> anyhow::Result<ForwardingTable> {
    let mut table = ForwardingTable::new();
    for (cidr, interface) in routes {
        let net = Ipv4Net::from_cidr(cidr)?;
        table.add(net.id(), net.prefix_len(), *interface)?;
    }
    Ok(table)
}

fn lookup(table: &ForwardingTable, address: [u8; 4]) -> (u16, u32) {
    let Resolution {
        interface,
        accesses,
    } = table.resolve(address.into());
    (interface.get(), accesses)
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0x5eed)
}

#[test]
fn nested_prefixes_resolve_to_the_longest_match() -> anyhow::Result<()> {
    let table = load(&[("10.0.0.0/8", 1), ("10.1.2.0/24", 2), ("10.1.2.128/25", 3)])?;

    assert_eq!(lookup(&table, [10, 9, 9, 9]), (1, 1));
    assert_eq!(lookup(&table, [10, 1, 2, 50]), (2, 2));
    assert_eq!(lookup(&table, [10, 1, 2, 200]), (3, 2));
    assert_eq!(lookup(&table, [10, 1, 3, 0]), (1, 1));
    assert_eq!(lookup(&table, [11, 0, 0, 0]), (0, 1));
    assert_eq!(table.block_count(), 1);
    Ok(())
}

#[test]
fn short_prefixes_resolve_in_one_access() -> anyhow::Result<()> {
    let mut rng = rng();
    for len in 0..=24u32 {
        let prefix: u32 = rng.gen();
        let net = Ipv4Net::new_short(prefix, len);
        let mut table = ForwardingTable::new();
        table.add(net.id(), len, len + 100)?;

        let host_bits = !net.mask().to_u32();
        for _ in 0..64 {
            let address = Ipv4Address::from(net.id().to_u32() | (rng.gen::<u32>() & host_bits));
            let found = table.resolve(address);
            assert_eq!(found.interface.get() as u32, len + 100, "/{len} at {address}");
            assert_eq!(found.accesses, 1);
        }

        if len > 0 {
            // the addresses just outside the prefix are untouched
            let below = net.id().to_u32().wrapping_sub(1);
            let above = net.broadcast().to_u32().wrapping_add(1);
            for outside in [below, above] {
                if !net.contains(outside.into()) {
                    assert!(table.resolve(outside.into()).interface.is_miss());
                }
            }
        }
    }
    Ok(())
}

#[test]
fn long_prefixes_resolve_in_two_accesses() -> anyhow::Result<()> {
    let mut rng = rng();
    for len in 25..=32u32 {
        let net = Ipv4Net::new_short(rng.gen::<u32>(), len);
        let mut table = ForwardingTable::new();
        table.add(net.id(), len, len)?;

        for address in net.id().to_u32()..=net.broadcast().to_u32() {
            assert_eq!(lookup(&table, Ipv4Address::from(address).to_bytes()), (len as u16, 2));
        }
        assert_eq!(table.block_count(), 1);
    }
    Ok(())
}

#[test]
fn routes_sharing_a_bucket_share_one_block() -> anyhow::Result<()> {
    let table = load(&[
        ("172.16.5.0/25", 1),
        ("172.16.5.128/26", 2),
        ("172.16.5.192/27", 3),
        ("172.16.5.255/32", 4),
    ])?;
    assert_eq!(table.block_count(), 1);

    assert_eq!(lookup(&table, [172, 16, 5, 0]), (1, 2));
    assert_eq!(lookup(&table, [172, 16, 5, 130]), (2, 2));
    assert_eq!(lookup(&table, [172, 16, 5, 200]), (3, 2));
    assert_eq!(lookup(&table, [172, 16, 5, 254]), (3, 2));
    assert_eq!(lookup(&table, [172, 16, 5, 255]), (4, 2));
    Ok(())
}

#[test]
fn slash_32_affects_a_single_address() -> anyhow::Result<()> {
    let table = load(&[("8.8.8.8/32", 5)])?;
    for host in 0..=255u8 {
        let expected = if host == 8 { 5 } else { 0 };
        assert_eq!(lookup(&table, [8, 8, 8, host]), (expected, 2));
    }
    assert_eq!(lookup(&table, [8, 8, 9, 8]), (0, 1));
    Ok(())
}

#[test]
fn slash_24_affects_exactly_256_addresses() -> anyhow::Result<()> {
    let table = load(&[("192.168.7.0/24", 6)])?;
    for host in 0..=255u8 {
        assert_eq!(lookup(&table, [192, 168, 7, host]), (6, 1));
    }
    assert_eq!(lookup(&table, [192, 168, 6, 255]), (0, 1));
    assert_eq!(lookup(&table, [192, 168, 8, 0]), (0, 1));
    Ok(())
}

#[test]
#[ntest::timeout(20000)]
fn default_route_covers_every_address() -> anyhow::Result<()> {
    let table = load(&[("0.0.0.0/0", 9)])?;

    // one address per bucket covers all 2^24 main slots
    for bucket in 0..MAIN_TABLE_SLOTS as u32 {
        let address = Ipv4Address::from(bucket << 8 | (bucket & 0xFF));
        assert_eq!(table.main_slot(address), Slot::Direct(Interface::try_from(9u32)?));
    }

    let mut rng = rng();
    for _ in 0..10_000 {
        let found = table.resolve(Ipv4Address::from(rng.gen::<u32>()));
        assert_eq!((found.interface.get(), found.accesses), (9, 1));
    }
    assert_eq!(table.block_count(), 0);
    Ok(())
}

#[test]
fn more_specific_routes_keep_the_default_elsewhere() -> anyhow::Result<()> {
    let table = load(&[
        ("0.0.0.0/0", 1),
        ("64.0.0.0/2", 2),
        ("100.64.0.0/10", 3),
        ("100.64.1.0/24", 4),
        ("100.64.1.64/26", 5),
    ])?;

    assert_eq!(lookup(&table, [1, 2, 3, 4]), (1, 1));
    assert_eq!(lookup(&table, [200, 0, 0, 1]), (1, 1));
    assert_eq!(lookup(&table, [65, 0, 0, 1]), (2, 1));
    assert_eq!(lookup(&table, [100, 127, 0, 1]), (3, 1));
    assert_eq!(lookup(&table, [100, 64, 1, 1]), (4, 2));
    assert_eq!(lookup(&table, [100, 64, 1, 100]), (5, 2));
    assert_eq!(lookup(&table, [100, 64, 1, 128]), (4, 2));
    Ok(())
}

#[test]
fn a_shorter_route_loaded_later_overwrites() -> anyhow::Result<()> {
    // loading order is the caller's responsibility; the last write wins
    let table = load(&[("10.1.0.0/16", 2), ("10.0.0.0/8", 1)])?;
    assert_eq!(lookup(&table, [10, 1, 0, 1]), (1, 1));

    // a /24 after a /25 points the bucket back at a direct interface; the
    // block the /25 created stays allocated but is no longer reachable
    let mut table = load(&[("10.1.2.0/25", 2), ("10.1.2.0/24", 1)])?;
    assert_eq!(lookup(&table, [10, 1, 2, 1]), (1, 1));
    assert_eq!(table.block_count(), 1);

    // another long route in that bucket cannot reach the old block, so the
    // bucket ends up with a second one
    table.add([10, 1, 2, 128].into(), 25, 3)?;
    assert_eq!(table.block_count(), 2);
    assert_eq!(lookup(&table, [10, 1, 2, 1]), (1, 2));
    assert_eq!(lookup(&table, [10, 1, 2, 200]), (3, 2));
    Ok(())
}

#[test]
fn invalid_interface_is_rejected_before_any_write() {
    let mut table = ForwardingTable::new();
    let address = Ipv4Address::new([10, 0, 0, 0]);

    assert_eq!(
        table.add(address, 8, 32768),
        Err(InsertError::Range(RangeError::Interface(32768)))
    );
    assert_eq!(table.block_count(), 0);
    assert_eq!(lookup(&table, [10, 0, 0, 1]), (0, 1));

    assert_eq!(
        table.add(address, 30, u32::MAX),
        Err(InsertError::Range(RangeError::Interface(u32::MAX)))
    );
    assert_eq!(table.block_count(), 0);
}

#[test]
fn largest_interface_survives_the_indirect_flag() -> anyhow::Result<()> {
    let table = load(&[("10.0.0.0/8", 32767), ("10.0.0.0/32", 32767)])?;
    assert_eq!(lookup(&table, [10, 0, 0, 0]), (32767, 2));
    assert_eq!(lookup(&table, [10, 0, 0, 1]), (32767, 2));
    assert_eq!(lookup(&table, [10, 0, 1, 0]), (32767, 1));
    Ok(())
}
