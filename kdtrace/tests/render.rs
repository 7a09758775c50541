use kdtrace::glam::{vec3, Vec3};
use kdtrace::gpu::{
    Light, Material, Ray, Triangle, TriangleId, Vec3Ext, RAY_MAG,
};
use kdtrace::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Floor quad (two triangles at `y = -1`) with a wall triangle standing on
/// it at `z = 6`.
fn geometry() -> Vec<Triangle> {
    vec![
        Triangle::flat([
            vec3(-3.0, -1.0, 2.0),
            vec3(3.0, -1.0, 2.0),
            vec3(3.0, -1.0, 8.0),
        ]),
        Triangle::flat([
            vec3(-3.0, -1.0, 2.0),
            vec3(3.0, -1.0, 8.0),
            vec3(-3.0, -1.0, 8.0),
        ]),
        Triangle::flat([
            vec3(-2.0, -1.0, 6.0),
            vec3(2.0, -1.0, 6.0),
            vec3(0.0, 2.0, 6.0),
        ]),
    ]
}

fn material() -> Material {
    Material::new(vec3(0.6, 0.5, 0.4), vec3(0.3, 0.3, 0.3))
        .with_reflectivity(0.4)
        .with_shininess(8.0)
}

/// Light that sees the front part of the floor.
fn front_light() -> Light {
    Light::new(vec3(1.0, 3.0, 0.0), Vec3::ONE)
}

/// Light hidden behind the wall from the front part of the floor.
fn back_light() -> Light {
    Light::new(vec3(0.0, 0.5, 9.0), Vec3::ONE)
}

fn scene(config: KdTreeConfig) -> Scene {
    let mut scene = Scene::default();
    let material = scene.add_material(material());

    scene.add_mesh(Mesh::new(geometry(), material));
    scene.add_light(front_light());
    scene.add_light(back_light());
    scene.build_kdtree(config).unwrap();
    scene
}

fn ray_towards(target: Vec3) -> Ray {
    Ray::new(Vec3::ZERO, target.normalize() * RAY_MAG)
}

#[test]
fn nearest_of_two_surfaces() {
    let scene = scene(KdTreeConfig::default());
    let options = RenderOptions::default();
    let tracer = Tracer::new(&scene, &options).unwrap();

    // Passes through the wall at z = 6 first, then would land on the floor
    // at z = 7.5
    let ray = Ray::new(Vec3::ZERO, vec3(0.0, -0.8, 6.0) * 50.0);
    let mut counters = RayCounters::default();
    let sp = tracer.find_intersection(ray, &mut counters).unwrap();

    assert_eq!(TriangleId::new(2), sp.triangle_id);
    assert!((sp.distance - 0.02).abs() < 1e-5);
    assert!(sp.point.abs_diff_eq(vec3(0.0, -0.8, 6.0), 1e-4));
}

#[test]
fn matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(1234);

    let config = KdTreeConfig::default()
        .with_max_node_faces(1)
        .with_cost_intersect(0.0);

    let scene = scene(config);
    let options = RenderOptions::default();
    let tracer = Tracer::new(&scene, &options).unwrap();

    for _ in 0..500 {
        let ray = ray_towards(vec3(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-2.0..3.0),
            rng.gen_range(1.0..9.0),
        ));

        let expected = scene
            .triangles()
            .iter()
            .filter_map(|triangle| triangle.hit(ray))
            .map(|hit| hit.distance)
            .min_by(|a, b| a.total_cmp(b));

        let actual = tracer
            .find_intersection(ray, &mut RayCounters::default())
            .map(|sp| sp.distance);

        assert_eq!(expected, actual, "ray: {:?}", ray);
    }
}

#[test]
fn shadows() {
    let scene = scene(KdTreeConfig::default());
    let ray = ray_towards(vec3(1.0, -1.0, 4.0));

    let shade = |cast_shadows| {
        let options = RenderOptions::default()
            .with_max_reflections(0)
            .with_cast_shadows(cast_shadows);

        let tracer = Tracer::new(&scene, &options).unwrap();
        let mut counters = RayCounters::default();
        let sp = tracer.find_intersection(ray, &mut counters).unwrap();
        let color = tracer.shade(ray, &sp, 0, 1.0, &mut counters);

        (sp, color, counters)
    };

    let (sp, lit, counters) = shade(false);

    // The floor's face normal points down, so it has to get flipped towards
    // the camera
    let normal = Vec3::Y;
    let view_refl = (-ray.direction() / RAY_MAG).mirror(normal);

    let contribution = |light: Light| {
        let light_dir = (light.position() - sp.point).normalize();

        material().diffuse(normal, light_dir)
            + material().specular(light_dir, view_refl)
    };

    let front = contribution(front_light());
    let back = contribution(back_light());

    assert!(sp.point.abs_diff_eq(vec3(1.0, -1.0, 4.0), 1e-4));
    assert!(back.min_element() > 0.0);
    assert!(lit.abs_diff_eq(front + back, 1e-5));
    assert_eq!(2, counters.brdf_evals);
    assert_eq!(0, counters.shadow_rays);

    let (_, shadowed, counters) = shade(true);

    assert!(shadowed.abs_diff_eq(front, 1e-5));
    assert_eq!(1, counters.brdf_evals);
    assert_eq!(2, counters.shadow_rays);
}

#[test]
fn full_frame() {
    let rays = PrimaryRays::new(32, 24, 60.0).generate();

    let render = |config| {
        let mut renderer =
            Renderer::new(RenderOptions::default().with_threads(3)).unwrap();

        let frame = renderer
            .render(&scene(config), &rays, &Default::default(), 32, 24)
            .unwrap();

        (frame, *renderer.stats())
    };

    let (frame, stats) = render(KdTreeConfig::default());

    assert_eq!(32 * 24, stats.prim_rays);
    assert_eq!(
        stats.prim_rays + stats.shadow_rays + stats.refl_rays,
        stats.rays_cast
    );
    assert!(stats.shadow_rays > 0);
    assert!(stats.refl_rays > 0);
    assert!(stats.min_aabb_tests <= stats.max_aabb_tests);

    // Top-left corner looks over the wall, into the void
    assert_eq!(Vec3::splat(BACKGROUND), frame.get(0, 0));

    let image = frame.to_image();

    assert_eq!((32, 24), image.dimensions());

    // The tree's shape mustn't be observable in the image
    // (with splits never paying off and no face limit, the root stays a
    // single leaf)
    let (single_leaf, _) = render(
        KdTreeConfig::default()
            .with_max_node_faces(0)
            .with_cost_intersect(0.0),
    );

    for (a, b) in frame.pixels().iter().zip(single_leaf.pixels()) {
        assert!(a.abs_diff_eq(*b, 1e-4), "{} != {}", a, b);
    }
}

#[test]
fn moved_camera() {
    let scene = scene(KdTreeConfig::default());
    let rays = PrimaryRays::new(8, 8, 60.0).generate();
    let mut renderer = Renderer::default();

    // Looking backwards, away from all the geometry
    let transform = RayTransform::new(kdtrace::glam::Mat4::from_rotation_y(
        std::f32::consts::PI,
    ));

    let frame = renderer.render(&scene, &rays, &transform, 8, 8).unwrap();

    assert!(frame
        .pixels()
        .iter()
        .all(|pixel| *pixel == Vec3::splat(BACKGROUND)));

    assert_eq!(0, renderer.stats().triangle_tests);
}
