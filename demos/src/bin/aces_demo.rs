use aces::{
    compile, Algebra, ArithChannel, ChannelParams, Decryptor, Encryptor, PlaintextRing, Refresher,
};
use rand::rngs::OsRng;

fn main() {
    env_logger::init();

    println!("ACES homomorphic encryption");
    println!("===========================");

    // p = 32, q = 10 * 32^5 + 1, n = 10, N = 5.
    let params = ChannelParams::new(32, 335_544_321, 10, 5);
    let threshold = params.decrypt_threshold();
    println!(
        "Channel: p = {}, q = {}, n = {}, N = {} (q/p = {})",
        params.p, params.q, params.n, params.width, threshold
    );

    let mut rng = OsRng;
    let channel = ArithChannel::generate(params, &mut rng).expect("admissible parameters");
    println!("Generated channel keys");

    let encryptor = Encryptor::new(channel.publish());
    let decryptor = Decryptor::new(&channel);
    let algebra = Algebra::new(channel.publish());
    let refresher = Refresher::new(&channel);

    // Basic homomorphic arithmetic.
    let (c1, _) = encryptor.encrypt(3, &mut rng).expect("message in range");
    let (c2, _) = encryptor.encrypt(2, &mut rng).expect("message in range");
    println!("\nEncrypted 3 and 2");
    println!("  dec(c1 + c2) = {}", decryptor.decrypt(&algebra.add(&c1, &c2)).value);
    println!("  dec(c1 * c2) = {}", decryptor.decrypt(&algebra.mult(&c1, &c2)).value);

    // A circuit deep enough to need a refresh:
    // F(x0..x7) = (x0 x1 + x2 x3 + x4 x5) x6 + x7.
    let inputs = [3u64, 5, 2, 7, 1, 4, 6, 9];
    println!("\nCircuit F = (0*1 + 2*3 + 4*5)*6 + 7 over {inputs:?}");

    let mut cts = Vec::new();
    let mut tags = Vec::new();
    for &m in &inputs {
        let (ct, tag) = encryptor.encrypt(m, &mut rng).expect("message in range");
        cts.push(ct);
        tags.push(tag);
    }

    let full = compile("(0*1+2*3+4*5)*6+7").expect("well-formed circuit");
    let expected = full
        .eval(&PlaintextRing::new(32), &inputs)
        .expect("plaintext evaluation");
    println!("  plaintext result: {expected}");

    let naive = full.eval(&algebra, &cts).expect("circuit evaluation");
    let naive_out = decryptor.decrypt(&naive);
    println!(
        "  naive evaluation: uplvl = {} (threshold {}), dec = {}{}",
        naive.uplvl(),
        threshold,
        naive_out.value,
        if naive_out.warning.is_some() {
            "  [over-level warning]"
        } else {
            ""
        }
    );

    // Split evaluation with a refresh in the middle.
    let stage_one = compile("0*1+2*3+4*5").expect("well-formed circuit");
    let partial = stage_one.eval(&algebra, &cts[..6]).expect("stage one");
    let partial_tag = stage_one
        .eval(&refresher, &tags[..6])
        .expect("stage one levels");

    let level = refresher.process(&[partial_tag])[0];
    match algebra.refresh(&partial, level) {
        Ok(refreshed) => {
            println!(
                "  refreshed stage one: uplvl {} -> {}",
                partial.uplvl(),
                refreshed.uplvl()
            );
            let stage_two = compile("0*1+2").expect("well-formed circuit");
            let finished = stage_two
                .eval(&algebra, &[refreshed, cts[6].clone(), cts[7].clone()])
                .expect("stage two");
            let out = decryptor.decrypt(&finished);
            println!(
                "  split evaluation: uplvl = {}, dec = {} (expected {})",
                finished.uplvl(),
                out.value,
                expected
            );
        }
        Err(err) => println!("  refresh rejected: {err}"),
    }
}
